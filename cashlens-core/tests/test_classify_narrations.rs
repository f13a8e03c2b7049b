use cashlens_core::{Category, Classifier, Direction, RuleTables, TransactionRecord};

fn classify(text: &str) -> TransactionRecord {
    Classifier::new().unwrap().classify(text)
}

#[test]
fn test_zomato_debit_example() {
    let r = classify("Paid Rs. 450 to Zomato for food on 12/04/2024");
    assert_eq!(
        r,
        TransactionRecord {
            date: "12/04/2024".to_string(),
            amount: Some(450.0),
            merchant: "Zomato".to_string(),
            category: Category::Food,
            sub_category: "Dining".to_string(),
            direction: Direction::Debit,
        }
    );
}

#[test]
fn test_salary_credit_example() {
    let r = classify("Salary credited INR 50,000 NEFT");
    assert_eq!(r.amount, Some(50000.0));
    assert_eq!(r.direction, Direction::Credit);
    assert_eq!(r.category, Category::Income);
    // "salary" is longer than "neft"
    assert_eq!(r.sub_category, "Salary");
    assert_eq!(r.merchant, "Salary");
    assert_eq!(r.date, "--");
}

#[test]
fn test_nothing_recognizable() {
    let r = classify("ref 7781 processed");
    assert_eq!(
        r,
        TransactionRecord {
            date: "--".to_string(),
            amount: None,
            merchant: "Unknown".to_string(),
            category: Category::Other,
            sub_category: "General".to_string(),
            direction: Direction::Unknown,
        }
    );
}

#[test]
fn test_upi_narration() {
    let r = classify("UPI/Paytm/Rahul/250.00 paid");
    assert_eq!(r.direction, Direction::Debit);
    assert_eq!(r.merchant, "Paytm");
    assert_eq!(r.category, Category::Upi);
    assert_eq!(r.sub_category, "UPI Payment");
    assert_eq!(r.amount, None);
}

#[test]
fn test_debit_precedence() {
    let debit = ["debit", "debited", "spent", "withdrawn", "paid", "payment", "purchase", "pos"];
    let credit = ["credit", "credited", "received", "salary", "cashback", "deposit"];
    let c = Classifier::new().unwrap();
    for d in debit {
        for cr in credit {
            let text = format!("{cr} ref 11 {d}");
            assert_eq!(c.classify(&text).direction, Direction::Debit, "{text}");
        }
    }
}

#[test]
fn test_electricity_bill_regardless_of_direction() {
    for text in [
        "electricity bill paid",
        "electricity bill refund credited",
        "electricity bill",
    ] {
        let r = classify(text);
        assert_eq!(r.category, Category::Bills, "{text}");
        assert_eq!(r.sub_category, "Electricity", "{text}");
        assert_eq!(r.merchant, "Electricity Board", "{text}");
    }
}

#[test]
fn test_longest_match_zomato_over_food() {
    let r = classify("food delivered by zomato");
    assert_eq!(r.sub_category, "Dining");
    assert_eq!(r.category, Category::Food);
}

#[test]
fn test_longest_match_beats_declaration_order() {
    // "gas" is declared before "amazon" in the keyword table
    let r = classify("amazon gas voucher");
    assert_eq!(r.sub_category, "E-commerce");
    assert_eq!(r.category, Category::Shopping);
}

#[test]
fn test_idempotent() {
    let c = Classifier::new().unwrap();
    let text = "Amazon purchase Rs 1,299.00 on 03/02/2024";
    let a = c.classify(text);
    let b = c.classify(text);
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn test_direction_fallback_completeness() {
    let r = classify("amount credited ref 7781");
    assert_eq!((r.category, r.sub_category.as_str()), (Category::Income, "General Income"));
    assert_eq!(r.merchant, "Income");

    let r = classify("amount debited ref 7781");
    assert_eq!((r.category, r.sub_category.as_str()), (Category::Expense, "General Expense"));
    assert_eq!(r.merchant, "Expense");
}

#[test]
fn test_invalid_date_kept_verbatim() {
    let r = classify("paid 32/13/2024");
    assert_eq!(r.date, "32/13/2024");
    assert_eq!(r.calendar_date(), None);
}

#[test]
fn test_custom_rules_from_toml_file() {
    let mut rules = RuleTables::default();
    rules.merchants.push(cashlens_core::MerchantRule {
        token: "bigbasket".to_string(),
        category: Category::Shopping,
    });
    rules.merchant_fallbacks.insert("bigbasket".to_string(), "Groceries".to_string());
    rules.sub_categories.insert("Groceries".to_string(), Category::Shopping);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, rules.to_toml_string().unwrap()).unwrap();

    let c = Classifier::with_rules(RuleTables::load(&path).unwrap()).unwrap();
    let r = c.classify("BigBasket order 5512 debited");
    assert_eq!(r.merchant, "Bigbasket");
    assert_eq!(r.sub_category, "Groceries");
    assert_eq!(r.category, Category::Shopping);
}

#[test]
fn test_parallel_classification_matches_sequential() {
    let c = Classifier::new().unwrap();
    let texts: Vec<String> = (0..64)
        .map(|i| format!("paid Rs {i} to uber on 0{}/01/2024", i % 9 + 1))
        .collect();
    let sequential: Vec<_> = texts.iter().map(|t| c.classify(t)).collect();

    let shared = &c;
    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|t| s.spawn(move || shared.classify(t)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}
