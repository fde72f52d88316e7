use super::*;
use crowdsale::Error;

#[test]
fn test_funds_collected_first() {
    let f = public_sale_success_hard_cap_not_reached();
    collect_funds(&f);
    ensure_refunds_are_not_allowed(&f);
    collect_rewards_core_then_partner(&f);
}

#[test]
fn test_partner_collects_reward_first() {
    let f = public_sale_success_hard_cap_not_reached();
    collect_rewards_partner_then_core(&f);
    ensure_refunds_are_not_allowed(&f);
    collect_funds(&f);
}

#[test]
fn test_late_contribution_rejected() {
    let f = public_sale_success_hard_cap_not_reached();
    let before = f.currency.balance(&f.public_user2);

    crate::assert_contract_error!(
        f.crowdsale.try_contribute(&f.public_user2, &UNIT),
        Error::SaleNotActive
    );
    assert_eq!(f.currency.balance(&f.public_user2), before);
    assert_eq!(f.crowdsale.get_raised_total(), 13 * UNIT);
    assert!(f.crowdsale.is_min_reached());
}

#[test]
fn test_rewards_claimable_once() {
    let f = public_sale_success_hard_cap_not_reached();
    collect_rewards_core_then_partner(&f);

    crate::assert_contract_error!(
        f.crowdsale.try_claim_partner_reward(&f.partner),
        Error::AlreadyClaimed
    );
    crate::assert_contract_error!(
        f.crowdsale.try_claim_core_team_reward(&f.owner, &f.multisig),
        Error::AlreadyClaimed
    );
}
