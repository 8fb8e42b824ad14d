use rust_decimal::Decimal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentDecision {
    Approved,
    Declined,
}

/// Seam for the payment step of checkout. The checkout handler only sees
/// this trait, so a real gateway client can replace the simulation without
/// touching the orchestration.
pub trait PaymentAuthorizer: Send + Sync {
    fn authorize(&self, card_number: &str, amount: Decimal) -> PaymentDecision;
}

/// Stand-in gateway: cards ending "1111" are declined, everything else is
/// approved ("0000" is the canonical always-approve test number). Not a
/// security boundary.
pub struct SimulatedGateway;

impl PaymentAuthorizer for SimulatedGateway {
    fn authorize(&self, card_number: &str, _amount: Decimal) -> PaymentDecision {
        if card_number.ends_with("0000") {
            return PaymentDecision::Approved;
        }
        if card_number.ends_with("1111") {
            return PaymentDecision::Declined;
        }
        PaymentDecision::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn suffix_rule_matches_the_gateway_contract() {
        let gateway = SimulatedGateway;

        assert_eq!(
            gateway.authorize("4111111111111111", dec!(42.50)),
            PaymentDecision::Declined
        );
        assert_eq!(
            gateway.authorize("4000000000000000", dec!(42.50)),
            PaymentDecision::Approved
        );
        assert_eq!(
            gateway.authorize("4242424242424242", dec!(42.50)),
            PaymentDecision::Approved
        );
    }

    #[test]
    fn decision_ignores_the_amount() {
        let gateway = SimulatedGateway;

        assert_eq!(
            gateway.authorize("5555555555551111", dec!(0.01)),
            PaymentDecision::Declined
        );
        assert_eq!(
            gateway.authorize("5555555555551111", dec!(9999999.99)),
            PaymentDecision::Declined
        );
    }
}
