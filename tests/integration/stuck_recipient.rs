use super::*;
use crowdsale::Error;

#[test]
fn test_unpayable_refund_recovered_manually() {
    let f = public_sale_failure(CurrencyKind::Blockable);
    f.block(&f.community_user1);

    crate::assert_contract_error!(
        f.crowdsale.try_claim_refund(&f.community_user1),
        Error::TransferFailed
    );

    let report = f.crowdsale.batch_refund(&f.owner, &BATCH_SIZE);
    assert_eq!(report.processed, 5);
    assert_eq!(report.refunded, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(f.crowdsale.refund_count(), 4);

    // The stuck contribution is all that is left.
    assert_eq!(f.contract_balance(), UNIT);
    let record = f.crowdsale.get_contribution(&f.community_user1).unwrap();
    assert!(record.refund_failed);
    assert!(!record.refunded);

    let multisig_before = f.currency.balance(&f.multisig);
    assert_eq!(
        f.crowdsale.withdraw_remaining_for_recovery(&f.owner),
        UNIT
    );
    assert_eq!(f.currency.balance(&f.multisig), multisig_before + UNIT);
    assert_eq!(f.contract_balance(), 0);

    crate::assert_contract_error!(
        f.crowdsale.try_claim_refund(&f.community_user1),
        Error::RecoveryCompleted
    );
}

#[test]
fn test_other_contributors_made_whole() {
    let f = public_sale_failure(CurrencyKind::Blockable);
    f.block(&f.community_user1);

    f.crowdsale.batch_refund(&f.owner, &BATCH_SIZE);
    for user in [&f.pp_user1, &f.pp_user2, &f.public_user1, &f.public_user2] {
        assert_eq!(f.currency.balance(user), INITIAL_BALANCE);
    }
    assert_eq!(
        f.currency.balance(&f.community_user1),
        INITIAL_BALANCE - UNIT
    );
}
