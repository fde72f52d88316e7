use super::*;
use crate::utils::assert_balances_restored;
use crowdsale::Error;

#[test]
fn test_batch_refund_returns_in_batches() {
    let f = public_sale_failure(CurrencyKind::StellarAsset);

    let mut counts = std::vec::Vec::new();
    for _ in 0..4 {
        f.crowdsale.batch_refund(&f.owner, &2);
        counts.push(f.crowdsale.refund_count());
    }
    // Only five contributors.
    assert_eq!(counts, std::vec![2, 4, 5, 5]);

    assert_eq!(f.contract_balance(), 0);
    assert_balances_restored(&f.starting_balances, &f.balances());
}

#[test]
fn test_batch_refund_skips_self_refunded() {
    let f = public_sale_failure(CurrencyKind::StellarAsset);

    f.crowdsale.claim_refund(&f.pp_user1);
    let before_batch = f.currency.balance(&f.pp_user1);

    f.crowdsale.batch_refund(&f.owner, &BATCH_SIZE);
    assert_eq!(f.currency.balance(&f.pp_user1), before_batch);
    assert_eq!(f.crowdsale.refund_count(), 4);
    assert_eq!(f.contract_balance(), 0);
}

#[test]
fn test_rewards_and_withdrawal_not_allowed() {
    let f = public_sale_failure(CurrencyKind::StellarAsset);

    crate::assert_contract_error!(
        f.crowdsale.try_withdraw_funds(&f.owner),
        Error::MinCapNotReached
    );
    crate::assert_contract_error!(
        f.crowdsale.try_claim_partner_reward(&f.partner),
        Error::MinCapNotReached
    );
    crate::assert_contract_error!(
        f.crowdsale.try_claim_core_team_reward(&f.owner, &f.multisig),
        Error::MinCapNotReached
    );
}

#[test]
fn test_recovery_waits_for_full_pass() {
    let f = public_sale_failure(CurrencyKind::StellarAsset);

    f.crowdsale.batch_refund(&f.owner, &2);
    crate::assert_contract_error!(
        f.crowdsale
            .try_withdraw_remaining_for_recovery(&f.owner),
        Error::PrematureRecovery
    );

    f.crowdsale.batch_refund(&f.owner, &BATCH_SIZE);
    assert_eq!(
        f.crowdsale.withdraw_remaining_for_recovery(&f.owner),
        0
    );
}
