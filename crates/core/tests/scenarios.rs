use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use splitledger_core::domain::EPSILON;
use splitledger_core::report::fairness_score;
use splitledger_core::{
    BalanceCalculator, Expense, GreedySettler, LedgerEngine, LedgerSnapshot, Participant,
    ParticipantId, ReportContext, Settler,
};

fn household() -> Vec<Participant> {
    vec![
        Participant::new("alice", "Alice"),
        Participant::new("bob", "Bob"),
        Participant::new("carol", "Carol"),
    ]
}

fn expense(id: &str, amount: Decimal, payer: &str, split: &[&str]) -> Expense {
    Expense::new(
        id,
        id,
        amount,
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        payer,
        split.iter().map(|p| ParticipantId::new(*p)).collect(),
    )
}

fn transfers_of(plan: &splitledger_core::SettlementPlan) -> Vec<(&str, &str, Decimal)> {
    plan.transfers
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount))
        .collect()
}

#[test]
fn scenario_a_one_payer_three_way_split() {
    let sheet = BalanceCalculator::new().calculate(
        &household(),
        &[expense("e1", dec!(300), "alice", &["alice", "bob", "carol"])],
    );

    let nets: Vec<(&str, Decimal)> = sheet
        .balances
        .iter()
        .map(|b| (b.name.as_str(), b.balance))
        .collect();
    assert_eq!(
        nets,
        vec![("Alice", dec!(200)), ("Bob", dec!(-100)), ("Carol", dec!(-100))]
    );

    let plan = GreedySettler::default().settle(&sheet.balances);
    assert_eq!(
        transfers_of(&plan),
        vec![("Carol", "Alice", dec!(100)), ("Bob", "Alice", dec!(100))]
    );
    assert_eq!(plan.total_amount(), dec!(200));
}

#[test]
fn scenario_b_two_way_split() {
    let sheet = BalanceCalculator::new().calculate(
        &household()[..2],
        &[expense("e1", dec!(100), "bob", &["alice", "bob"])],
    );

    let alice = sheet.get(&"alice".into()).unwrap();
    let bob = sheet.get(&"bob".into()).unwrap();
    assert_eq!(alice.total_owed, dec!(50));
    assert_eq!(bob.total_paid, dec!(100));
    assert_eq!(bob.total_owed, dec!(50));
    assert_eq!(bob.balance, dec!(50));
    assert_eq!(alice.balance, dec!(-50));

    let plan = GreedySettler::default().settle(&sheet.balances);
    assert_eq!(transfers_of(&plan), vec![("Alice", "Bob", dec!(50))]);
}

#[test]
fn scenario_c_everyone_pays_their_share() {
    let sheet = BalanceCalculator::new().calculate(
        &household(),
        &[
            expense("e1", dec!(90), "alice", &["alice", "bob", "carol"]),
            expense("e2", dec!(90), "bob", &["alice", "bob", "carol"]),
            expense("e3", dec!(90), "carol", &["alice", "bob", "carol"]),
        ],
    );

    assert!(sheet.balances.iter().all(|b| b.is_settled(EPSILON)));
    assert!(GreedySettler::default().settle(&sheet.balances).is_empty());
}

#[test]
fn scenario_d_fairness_score() {
    assert_eq!(fairness_score(&[dec!(120), dec!(120)]), 100.0);

    let lopsided = fairness_score(&[dec!(120), Decimal::ZERO]);
    assert_eq!(lopsided, 0.0);

    let slightly_uneven = fairness_score(&[dec!(10), dec!(12)]);
    assert!(slightly_uneven < 100.0 && slightly_uneven > lopsided);
}

#[test]
fn empty_input_produces_empty_output() {
    let report = LedgerEngine::default()
        .run(&LedgerSnapshot::default(), &ReportContext::new())
        .unwrap();

    assert!(report.balances.balances.is_empty());
    assert!(report.settlement.is_empty());
    assert!(report.categories.is_empty());
    assert!(report.top_days.is_empty());
    assert!(report.leaderboard.rankings.is_empty());
    assert_eq!(report.summary.total_spent, Decimal::ZERO);
}

#[test]
fn individual_settlement_view() {
    let ledger = LedgerSnapshot::new(
        household(),
        vec![
            expense("e1", dec!(300), "alice", &["alice", "bob", "carol"]),
            expense("e2", dec!(45), "carol", &["bob", "carol"]),
        ],
    );
    let report = LedgerEngine::default()
        .run(&ledger, &ReportContext::new())
        .unwrap();

    // alice +200, bob -122.5, carol -77.5
    let bob_view = report.settlement.involving(&"bob".into());
    assert_eq!(bob_view.len(), 1);
    assert_eq!(bob_view[0].to, "Alice");
    assert_eq!(bob_view[0].amount, dec!(122.5));

    let alice_view = report.settlement.involving(&"alice".into());
    assert_eq!(alice_view.len(), 2);
}

#[test]
fn report_serializes_for_consumers() {
    let ledger = LedgerSnapshot::new(
        household(),
        vec![expense("e1", dec!(300), "alice", &["alice", "bob", "carol"])],
    );
    let report = LedgerEngine::default()
        .run(&ledger, &ReportContext::new())
        .unwrap();

    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["balances"]["balances"][0]["name"], "Alice");
    assert_eq!(value["settlement"]["transfers"].as_array().unwrap().len(), 2);
    assert_eq!(value["settlement"]["transfers"][0]["from"], "Carol");
}

#[test]
fn sub_cent_creditors_leave_consistent_residual() {
    let ledger = LedgerSnapshot::new(
        vec![
            Participant::new("a", "a"),
            Participant::new("z", "z"),
            Participant::new("c1", "c1"),
            Participant::new("c2", "c2"),
            Participant::new("c3", "c3"),
        ],
        vec![
            expense("e0", dec!(20), "a", &["a", "z"]),
            expense("e1", dec!(0.02), "c1", &["c1", "z"]),
            expense("e2", dec!(0.02), "c2", &["c2", "z"]),
            expense("e3", dec!(0.02), "c3", &["c3", "z"]),
        ],
    );
    let report = LedgerEngine::default()
        .run(&ledger, &ReportContext::new())
        .unwrap();

    assert_eq!(report.balances.net_total(), Decimal::ZERO);
    let transfers: Vec<String> = report.settlement.transfers.iter().map(|t| t.to_string()).collect();
    assert_eq!(transfers, vec!["z owes a: 10.00"]);

    assert_eq!(report.settlement.unsettled.len(), 1);
    assert_eq!(report.settlement.unsettled[0].amount, dec!(-0.03));
    assert!(!report.settlement.is_complete());
    assert!(report.settlement.is_consistent(EPSILON));
    assert!(report.is_consistent(EPSILON));
}
