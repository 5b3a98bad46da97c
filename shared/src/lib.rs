use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Spending category attached to every expense.
///
/// Serialized with the variant name (`"Food"`, `"Transport"`, ...). Unknown
/// names coming back from the server are folded into `Other` rather than
/// failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Healthcare,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive match on the category name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|name| name.parse().ok()).unwrap_or_default())
    }
}

/// An expense as it travels over the wire to and from the ExpenseTracker API.
///
/// The server hands out numeric ids while the app generates string ids, so
/// `id` accepts either and always yields a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "amount_from_any")]
    pub amount: f64,
    #[serde(default)]
    pub category: Category,
    /// Locale-formatted creation date
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

/// Response of `GET /ExpenseTracker/LoadExpenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadExpensesResponse {
    pub status: bool,
    #[serde(rename = "expenseList", default)]
    pub expense_list: Vec<ExpenseDto>,
}

/// Body of `POST /ExpenseTracker/SaveExpenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveExpenseRequest {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: String,
    /// Id of the logged-in user owning the expense
    pub user: String,
}

/// Response of `POST /ExpenseTracker/SaveExpenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveExpenseResponse {
    pub status: bool,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `DELETE /ExpenseTracker/DeleteExpenses?id={id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /ExpenseTracker/Login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The user record returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
}

/// Response of `POST /ExpenseTracker/Login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: bool,
    #[serde(rename = "logUser", default)]
    pub log_user: Option<LoggedUser>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /ExpenseTracker/Register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Response of `POST /ExpenseTracker/Register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn value_to_id<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!("expected string or number id, got {}", other))),
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_id(Value::deserialize(deserializer)?)
}

pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_to_id(value).map(Some),
    }
}

/// Treats an explicit `null` like a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Amounts are numbers in our own payloads but some server builds send them
/// as strings
pub fn amount_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("amount out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid amount '{}': {}", s, e))),
        other => Err(D::Error::custom(format!("expected numeric amount, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" Healthcare ".parse::<Category>().unwrap(), Category::Healthcare);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_unknown_category_deserializes_as_other() {
        let category: Category = serde_json::from_value(json!("Pets")).unwrap();
        assert_eq!(category, Category::Other);
    }

    #[test]
    fn test_expense_dto_accepts_numeric_id_and_string_amount() {
        let dto: ExpenseDto = serde_json::from_value(json!({
            "id": 17,
            "title": "Bus ticket",
            "amount": "2.80",
            "category": "Transport",
            "date": "10/16/2026"
        }))
        .unwrap();

        assert_eq!(dto.id, "17");
        assert_eq!(dto.amount, 2.80);
        assert_eq!(dto.category, Category::Transport);
    }

    #[test]
    fn test_null_category_and_date_fall_back_to_defaults() {
        let res: LoadExpensesResponse = serde_json::from_str(
            r#"{"status":true,"expenseList":[
                {"id":1,"title":"A","amount":2,"category":null,"date":"x"},
                {"id":2,"title":"B","amount":3,"category":"Food","date":null},
                {"id":3,"title":"C","amount":4}
            ]}"#,
        )
        .unwrap();

        assert_eq!(res.expense_list.len(), 3);
        assert_eq!(res.expense_list[0].category, Category::Other);
        assert_eq!(res.expense_list[0].date, "x");
        assert_eq!(res.expense_list[1].category, Category::Food);
        assert_eq!(res.expense_list[1].date, "");
        assert_eq!(res.expense_list[2].category, Category::Other);
    }

    #[test]
    fn test_save_response_without_id() {
        let res: SaveExpenseResponse =
            serde_json::from_value(json!({ "status": false, "message": "db down" })).unwrap();
        assert!(!res.status);
        assert_eq!(res.id, None);
        assert_eq!(res.message.as_deref(), Some("db down"));

        let res: SaveExpenseResponse =
            serde_json::from_value(json!({ "status": true, "id": 42 })).unwrap();
        assert_eq!(res.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_load_response_field_names() {
        let res: LoadExpensesResponse = serde_json::from_value(json!({
            "status": true,
            "expenseList": [
                { "id": "a1", "title": "Rent", "amount": 900, "category": "Bills", "date": "10/01/2026" }
            ]
        }))
        .unwrap();
        assert_eq!(res.expense_list.len(), 1);
        assert_eq!(res.expense_list[0].amount, 900.0);
    }

    #[test]
    fn test_register_request_uses_camel_case_confirm() {
        let body = serde_json::to_value(RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
        })
        .unwrap();
        assert_eq!(body["confirmPassword"], "pw");
        assert_eq!(body["full_name"], "Ada Lovelace");
    }
}
