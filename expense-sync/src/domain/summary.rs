//! Derived values over the expense collection. Always recomputed from the
//! slice they are given; nothing here is cached.

use shared::Category;

use crate::domain::models::expense::Expense;

/// Sum of all amounts regardless of sync state
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn unsynced_count(expenses: &[Expense]) -> usize {
    expenses.iter().filter(|e| !e.synced).count()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total_amount: f64,
    pub unsynced_count: usize,
    /// Per-category totals in `Category::ALL` order, empty categories omitted
    pub by_category: Vec<(Category, f64)>,
}

impl ExpenseSummary {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let by_category = Category::ALL
            .iter()
            .filter_map(|category| {
                let mut matching = expenses.iter().filter(|e| e.category == *category).peekable();
                matching.peek()?;
                Some((*category, matching.map(|e| e.amount).sum()))
            })
            .collect();

        Self {
            count: expenses.len(),
            total_amount: total_amount(expenses),
            unsynced_count: unsynced_count(expenses),
            by_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, category: Category, synced: bool) -> Expense {
        Expense {
            id: format!("{}-{}", category, amount),
            title: "x".to_string(),
            amount,
            category,
            date: "10/16/2026".to_string(),
            synced,
            remote_id: None,
        }
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(total_amount(&[]), 0.0);
        assert_eq!(unsynced_count(&[]), 0);
        let summary = ExpenseSummary::from_expenses(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_totals_ignore_sync_state() {
        let expenses = vec![
            expense(3.5, Category::Food, false),
            expense(10.0, Category::Bills, true),
            expense(1.25, Category::Food, true),
        ];
        assert!((total_amount(&expenses) - 14.75).abs() < 1e-9);
        assert_eq!(unsynced_count(&expenses), 1);
    }

    #[test]
    fn test_summary_groups_by_category_in_fixed_order() {
        let expenses = vec![
            expense(10.0, Category::Bills, true),
            expense(2.0, Category::Food, false),
            expense(3.0, Category::Food, true),
        ];
        let summary = ExpenseSummary::from_expenses(&expenses);
        assert_eq!(
            summary.by_category,
            vec![(Category::Food, 5.0), (Category::Bills, 10.0)]
        );
        assert_eq!(summary.unsynced_count, 1);
        assert_eq!(summary.count, 3);
    }
}
