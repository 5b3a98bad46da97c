use crate::domain::models::expense::Expense;
use crate::domain::models::session::SessionContext;
use shared::{ExpenseDto, SaveExpenseRequest};

pub struct ExpenseMapper;

impl ExpenseMapper {
    /// Records coming from the server are confirmed by definition
    pub fn to_domain(dto: ExpenseDto) -> Expense {
        Expense {
            id: dto.id,
            title: dto.title,
            amount: dto.amount,
            category: dto.category,
            date: dto.date,
            synced: true,
            remote_id: None,
        }
    }

    pub fn to_save_request(domain: &Expense, session: &SessionContext) -> SaveExpenseRequest {
        SaveExpenseRequest {
            id: domain.id.clone(),
            title: domain.title.clone(),
            amount: domain.amount,
            category: domain.category,
            date: domain.date.clone(),
            user: session.user_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;

    #[test]
    fn test_to_domain_marks_synced() {
        let expense = ExpenseMapper::to_domain(ExpenseDto {
            id: "42".to_string(),
            title: "Groceries".to_string(),
            amount: 54.2,
            category: Category::Food,
            date: "10/15/2026".to_string(),
        });
        assert!(expense.synced);
        assert_eq!(expense.remote_id, None);
        assert_eq!(expense.remote_key(), "42");
    }

    #[test]
    fn test_save_request_carries_session_user() {
        let expense = Expense::new_local(
            "Taxi".to_string(),
            18.0,
            Category::Transport,
            "10/16/2026".to_string(),
            1,
        );
        let session = SessionContext::new("77", "Dana");
        let request = ExpenseMapper::to_save_request(&expense, &session);
        assert_eq!(request.user, "77");
        assert_eq!(request.id, expense.id);
        assert_eq!(request.category, Category::Transport);
    }
}
