//! End-to-end tests over the real file-backed store.

use std::path::PathBuf;

use qsurv_node::{LedgerNode, NodeConfig};
use qsurv_types::{QuAmount, StakingTier, SurveyId, TxKind, WalletAddress};

fn temp_node() -> (tempfile::TempDir, LedgerNode) {
    let dir = tempfile::tempdir().expect("temp dir");
    let node = node_at(dir.path().join("ledger.json"));
    (dir, node)
}

fn node_at(ledger_path: PathBuf) -> LedgerNode {
    let config = NodeConfig {
        ledger_path,
        ..Default::default()
    };
    LedgerNode::open(config).expect("open node")
}

fn qu(raw: u64) -> QuAmount {
    QuAmount::new(raw)
}

#[test]
fn full_flow_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let bob = WalletAddress::new("BOB");
    let s1 = SurveyId::from("s1");

    {
        let node = node_at(path.clone());
        let engine = node.engine();
        engine.lock_funds(&s1, qu(1000), &WalletAddress::new("ALICE")).unwrap();
        engine.stake_funds(&bob, qu(10_000_000)).unwrap();
        engine.payout(&s1, qu(600), &bob, None).unwrap();
    }

    // A fresh node over the same file sees identical state.
    let node = node_at(path);
    let engine = node.engine();

    let survey = engine.contract_state(&s1).unwrap();
    assert_eq!(survey.balance, qu(400));
    assert!(survey.is_active);
    assert_eq!(survey.transactions.len(), 2); // FUND + PAYOUT (bonus skipped: treasury held only the 30 fee)

    let user = engine.user_staking(&bob).unwrap();
    assert_eq!(user.staking_balance, qu(10_000_000));
    assert_eq!(user.tier, StakingTier::Analyst);
    assert_eq!(engine.user_earnings(&bob).unwrap(), qu(600));
    assert_eq!(engine.summary().unwrap().treasury_balance, qu(30));
}

#[test]
fn transaction_order_is_preserved_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let s1 = SurveyId::from("s1");

    {
        let node = node_at(path.clone());
        let engine = node.engine();
        engine.lock_funds(&s1, qu(100), &WalletAddress::new("A")).unwrap();
        engine.payout(&s1, qu(40), &WalletAddress::new("B"), None).unwrap();
        engine.lock_funds(&s1, qu(200), &WalletAddress::new("A")).unwrap();
    }

    let node = node_at(path);
    let kinds: Vec<TxKind> = node
        .engine()
        .contract_state(&s1)
        .unwrap()
        .transactions
        .iter()
        .map(|tx| tx.kind)
        .collect();
    assert_eq!(kinds, vec![TxKind::Fund, TxKind::Payout, TxKind::Fund]);
}

#[test]
fn ledger_file_written_by_previous_deployments_parses() {
    // Hand-written blob in the layout the platform has always used.
    let blob = r#"{
      "surveys": {
        "cm1abc": {
          "balance": 400,
          "isActive": true,
          "transactions": [
            {
              "hash": "0f650a7563e8399d9e9e2b945ac1f3fa5f7e615b76cefa25f47b4ab2a280",
              "type": "FUND",
              "amount": 1000,
              "timestamp": "2024-12-01T09:00:00.000Z",
              "from": "ALICE",
              "to": "QSURV_CONTRACT_ADDRESS"
            },
            {
              "hash": "99e52e6f9800c4f4e6be1372f4c11912e15c1e04297d1bfbfedb2b43d0c1",
              "type": "PAYOUT",
              "amount": 600,
              "timestamp": "2024-12-02T09:00:00.000Z",
              "from": "QSURV_CONTRACT_ADDRESS",
              "to": "BOB"
            }
          ]
        }
      },
      "users": {
        "BOB": { "stakingBalance": 10000000, "tier": "Analyst" }
      },
      "treasuryBalance": 30
    }"#;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, blob).unwrap();

    let node = node_at(path);
    let engine = node.engine();
    let s = SurveyId::from("cm1abc");
    let bob = WalletAddress::new("BOB");

    assert_eq!(engine.contract_state(&s).unwrap().balance, qu(400));
    assert_eq!(engine.user_staking(&bob).unwrap().tier, StakingTier::Analyst);
    assert_eq!(engine.user_earnings(&bob).unwrap(), qu(600));

    // Treasury already holds 30; the fee lifts it to 45, enough to cover
    // the 30 QU analyst bonus on a 300 QU payout.
    let receipt = engine.payout(&s, qu(300), &bob, None).unwrap();
    assert_eq!(receipt.bonus, qu(30));
    assert_eq!(engine.contract_state(&s).unwrap().balance, qu(100));
    assert_eq!(engine.summary().unwrap().treasury_balance, qu(15));
}

#[test]
fn emitted_blob_uses_the_original_key_names() {
    let (_dir, node) = temp_node();
    let engine = node.engine();
    let s1 = SurveyId::from("s1");
    engine.lock_funds(&s1, qu(1000), &WalletAddress::new("ALICE")).unwrap();
    engine.stake_funds(&WalletAddress::new("BOB"), qu(1_000_000)).unwrap();
    engine.payout(&s1, qu(100), &WalletAddress::new("BOB"), None).unwrap();

    let raw = std::fs::read_to_string(node.config().ledger_path.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let survey = &value["surveys"]["s1"];
    assert_eq!(survey["isActive"], true);
    assert_eq!(survey["balance"], 900);
    let fund = &survey["transactions"][0];
    assert_eq!(fund["type"], "FUND");
    assert_eq!(fund["to"], "QSURV_CONTRACT_ADDRESS");
    assert_eq!(fund["hash"].as_str().unwrap().len(), 60);
    // ISO-8601 timestamp string
    assert!(fund["timestamp"].as_str().unwrap().contains('T'));

    assert_eq!(value["users"]["BOB"]["stakingBalance"], 1_000_000);
    assert_eq!(value["users"]["BOB"]["tier"], "Participant");
    // 5 QU fee came in and immediately funded the 5 QU participant bonus.
    assert_eq!(value["treasuryBalance"], 0);
    assert_eq!(survey["transactions"][2]["type"], "BONUS");
}

#[test]
fn payout_pays_bonus_and_referral_from_the_same_treasury() {
    let blob = r#"{ "surveys": {}, "users": {}, "treasuryBalance": 1000 }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, blob).unwrap();

    let node = node_at(path);
    let engine = node.engine();
    let s1 = SurveyId::from("s1");
    let bob = WalletAddress::new("BOB");
    let eve = WalletAddress::new("EVE");

    engine.lock_funds(&s1, qu(1000), &WalletAddress::new("ALICE")).unwrap();
    engine.stake_funds(&bob, qu(10_000_000)).unwrap();

    let receipt = engine.payout(&s1, qu(600), &bob, Some(&eve)).unwrap();
    assert_eq!(receipt.bonus, qu(60)); // analyst, 10% of gross
    assert_eq!(receipt.referral, qu(150)); // 25% of gross

    let txs = engine.contract_state(&s1).unwrap().transactions;
    assert_eq!(txs.len(), 4); // FUND, PAYOUT, BONUS x2
    assert_eq!(txs[2].kind, TxKind::Bonus);
    assert_eq!(txs[2].to, Some(bob.clone()));
    assert_eq!(txs[3].kind, TxKind::Bonus);
    assert_eq!(txs[3].to, Some(eve.clone()));

    // treasury: 1000 + 30 fee - 60 bonus - 150 referral
    assert_eq!(engine.summary().unwrap().treasury_balance, qu(820));
    assert_eq!(engine.user_earnings(&bob).unwrap(), qu(660));
    assert_eq!(engine.user_earnings(&eve).unwrap(), qu(150));
}

#[test]
fn corrupt_blob_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, "{ \"surveys\": oops").unwrap();

    let config = NodeConfig {
        ledger_path: path,
        ..Default::default()
    };
    assert!(LedgerNode::open(config).is_err());
}

#[test]
fn open_creates_missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/data/ledger.json");
    let node = node_at(path);
    node.engine()
        .lock_funds(&SurveyId::from("s1"), qu(1), &WalletAddress::new("A"))
        .unwrap();
    assert!(node.config().ledger_path.exists());
}

#[test]
fn spec_example_scenario() {
    // lock 1000 to s1 from alice; bob is Analyst; treasury prefunded so the
    // 10% bonus clears: payout 600 leaves 400 escrow, 60 bonus, both in
    // bob's earnings.
    let blob = r#"{ "surveys": {}, "users": {}, "treasuryBalance": 100 }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, blob).unwrap();

    let node = node_at(path);
    let engine = node.engine();
    let s1 = SurveyId::from("s1");
    let bob = WalletAddress::new("BOB");

    engine.lock_funds(&s1, qu(1000), &WalletAddress::new("ALICE")).unwrap();
    assert_eq!(engine.contract_state(&s1).unwrap().balance, qu(1000));

    engine.stake_funds(&bob, qu(10_000_000)).unwrap();
    let receipt = engine.payout(&s1, qu(600), &bob, None).unwrap();
    assert_eq!(receipt.bonus, qu(60));

    let survey = engine.contract_state(&s1).unwrap();
    assert_eq!(survey.balance, qu(400));
    let payout = &survey.transactions[1];
    assert_eq!(payout.kind, TxKind::Payout);
    assert_eq!(payout.amount, qu(600));
    let bonus = &survey.transactions[2];
    assert_eq!(bonus.kind, TxKind::Bonus);
    assert_eq!(bonus.amount, qu(60));
    assert_eq!(bonus.to, Some(bob.clone()));

    // payout(s1, 500) when balance is 400 fails and changes nothing
    let result = engine.payout(&s1, qu(500), &WalletAddress::new("CAROL"), None);
    assert!(result.is_err());
    assert_eq!(engine.contract_state(&s1).unwrap().balance, qu(400));
    assert_eq!(engine.user_earnings(&bob).unwrap(), qu(660));
}
