use proptest::prelude::*;

use super::common::*;
use crate::config::LendingConfig;
use crate::decision::scoring::credit_score;
use crate::decision::{classify, DecisionError, LoanOffer, Segment};

// Adults between 25 and 65 on the reference day. The suffix is the serial
// followed by the check digit, so serials below 250 land in the debtor segment.
fn adult_code(serials: std::ops::Range<u32>) -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec![3u32, 4]),
        60u32..=99,
        1u32..=12,
        1u32..=28,
        serials,
    )
        .prop_map(|(gender, year, month, day, serial)| {
            with_check_digit(&format!("{gender}{year:02}{month:02}{day:02}{serial:03}"))
        })
}

fn suffix(code: &str) -> u16 {
    code[code.len() - 4..].parse().expect("numeric suffix")
}

/// Every approvable pair, ordered by ascending period then descending amount.
fn first_approvable(config: &LendingConfig, modifier: u32, period: i32) -> Option<LoanOffer> {
    let mut candidates = Vec::new();
    for loan_period in period..=config.max_period {
        let mut loan_amount = config.min_amount;
        while loan_amount <= config.max_amount {
            let score = credit_score(modifier, loan_amount, loan_period, config.score_divisor);
            if score >= config.min_credit_score {
                candidates.push(LoanOffer {
                    loan_amount,
                    loan_period,
                });
            }
            loan_amount += config.amount_step;
        }
    }
    candidates.sort_by_key(|offer| (offer.loan_period, std::cmp::Reverse(offer.loan_amount)));
    candidates.into_iter().next()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn debtors_never_receive_offers(
        code in adult_code(0..250),
        amount in 2_000i64..=10_000,
        period in 12i32..=48,
    ) {
        prop_assert!(suffix(&code) < 2_500);

        let trace = engine().decide_traced(&request(&code, amount, period), today());
        prop_assert_eq!(trace.outcome, Err(DecisionError::NoValidLoan));
        prop_assert_eq!(trace.score_evaluations, 0);
    }

    #[test]
    fn offer_is_first_approvable_pair_in_search_order(
        code in adult_code(250..1000),
        amount in 2_000i64..=10_000,
        period in 12i32..=48,
    ) {
        prop_assert!(suffix(&code) >= 2_500);

        let config = lending_config();
        let modifier = classify(&code, &config.segments).expect("numeric suffix");
        let expected = first_approvable(&config, modifier, period);

        match engine().decide_on(&request(&code, amount, period), today()) {
            Ok(offer) => {
                prop_assert_eq!(Some(offer), expected);
                prop_assert!(offer.loan_period >= period && offer.loan_period <= config.max_period);
                prop_assert!(offer.loan_amount >= config.min_amount && offer.loan_amount <= config.max_amount);
            }
            Err(err) => {
                prop_assert_eq!(err, DecisionError::NoValidLoan);
                prop_assert_eq!(expected, None);
            }
        }
    }

    #[test]
    fn decisions_are_repeatable(
        code in adult_code(0..1000),
        amount in 2_000i64..=10_000,
        period in 12i32..=48,
    ) {
        let engine = engine();
        let request = request(&code, amount, period);
        prop_assert_eq!(
            engine.decide_traced(&request, today()),
            engine.decide_traced(&request, today())
        );
    }

    #[test]
    fn segment_modifier_never_decreases_with_suffix(a in 0u16..=9_999, b in 0u16..=9_999) {
        let (low, high) = (a.min(b), a.max(b));
        let modifiers = lending_config().segments;
        prop_assert!(
            Segment::from_suffix(low).modifier(&modifiers)
                <= Segment::from_suffix(high).modifier(&modifiers)
        );
    }
}
