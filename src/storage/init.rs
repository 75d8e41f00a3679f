//! First-run data
//!
//! The starter document written when no month exists yet.

use crate::models::migrate::default_categories;
use crate::models::{BudgetDocument, CategoryKey, LineItem, Money};

/// Build the starter budget used for the very first month
///
/// `oneTime` has no category metadata: it shows up as
/// uncategorized and stays out of the section totals.
pub fn seed_document() -> BudgetDocument {
    let mut document = BudgetDocument::new(Money::from_dollars_cents(18000, 0));

    for (key, meta) in default_categories() {
        document.categories.insert(key, meta);
    }

    let lists: [(&str, &[(&str, i64)]); 5] = [
        ("income", &[("Monthly Income", 375000), ("Additional Income", 558700)]),
        ("credit", &[("Chase", 141128), ("Amex", 6742), ("Fidelity", 633959)]),
        (
            "monthly",
            &[
                ("Cash", 10000),
                ("Coffee", 20000),
                ("Copayments", 4000),
                ("Doctors", 12500),
                ("Food", 120000),
                ("HOA", 39000),
                ("Personal", 5000),
                ("MTA", 15000),
                ("RC", 10000),
                ("Therapy", 135000),
            ],
        ),
        ("utils", &[("ConEd", 10000), ("Fios", 8500), ("Nat Grid", 15000)]),
        ("oneTime", &[("House Insurance", 150000)]),
    ];

    for (key, items) in lists {
        document.items.insert(
            CategoryKey::from(key),
            items
                .iter()
                .map(|(name, cents)| LineItem::new(*name, Money::from_cents(*cents)))
                .collect(),
        );
    }

    document
}
