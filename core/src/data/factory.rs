use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::data::fixtures::TestData;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{Category, Credentials, UserRegistration};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chloe", "Diego", "Elena", "Farid", "Grace", "Hiro", "Ingrid", "Jonas",
    "Keiko", "Liam", "Maya", "Nikolai", "Olivia", "Pablo", "Quinn", "Rosa", "Samir", "Tessa",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Bianchi", "Carter", "Dubois", "Evans", "Fischer", "Garcia", "Hughes", "Ivanova",
    "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Okafor", "Petrov", "Quinteros",
    "Rossi", "Schmidt", "Thompson",
];

const GENDERS: &[&str] = &["Male", "Female"];

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const VALID_PASSWORD_LEN: usize = 8;
const INVALID_PASSWORD_LEN: usize = 5;

/// Minimum password length the registration endpoint accepts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Returns whether `password` satisfies the registration policy: at least
/// eight characters, an uppercase letter, a lowercase letter, a digit, and
/// nothing outside ASCII letters and digits.
pub fn meets_password_policy(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().all(|c| c.is_ascii_alphanumeric())
}

#[derive(Deserialize)]
struct BookRef {
    #[serde(rename = "bookId")]
    book_id: u64,
}

/// Produces test inputs from fixture data and a caller-supplied random
/// source. Seed the source (e.g. `StdRng::seed_from_u64`) for reproducible
/// runs.
pub struct DataFactory<R> {
    data: TestData,
    rng: R,
}

impl<R: Rng> DataFactory<R> {
    pub fn new(data: TestData, rng: R) -> Self {
        Self { data, rng }
    }

    pub fn test_data(&self) -> &TestData {
        &self.data
    }

    /// A random account from `valid_users`.
    pub fn valid_user_credentials(&mut self) -> Result<Credentials, ApiError> {
        self.data
            .valid_users
            .choose(&mut self.rng)
            .cloned()
            .ok_or(ApiError::EmptyCollection("valid_users"))
    }

    /// A random account from `invalid_users`.
    pub fn invalid_user_credentials(&mut self) -> Result<Credentials, ApiError> {
        self.data
            .invalid_users
            .choose(&mut self.rng)
            .cloned()
            .ok_or(ApiError::EmptyCollection("invalid_users"))
    }

    pub fn expected_categories(&self) -> &[Category] {
        &self.data.expected_categories
    }

    /// Eight alphanumeric characters with at least one uppercase letter,
    /// one lowercase letter and one digit.
    pub fn valid_password(&mut self) -> String {
        let mut chars = vec![
            self.pick_byte(UPPER),
            self.pick_byte(LOWER),
            self.pick_byte(DIGITS),
        ];
        while chars.len() < VALID_PASSWORD_LEN {
            chars.push(self.pick_byte(ALNUM));
        }
        chars.shuffle(&mut self.rng);
        chars.into_iter().map(char::from).collect()
    }

    /// Five lowercase letters: too short and missing both an uppercase
    /// letter and a digit.
    pub fn invalid_password(&mut self) -> String {
        (0..INVALID_PASSWORD_LEN)
            .map(|_| char::from(self.pick_byte(LOWER)))
            .collect()
    }

    /// A generated user name followed by a random three-digit suffix. The
    /// suffix makes collisions across runs unlikely, not impossible.
    pub fn username(&mut self) -> String {
        let first = self.pick_str(FIRST_NAMES).to_ascii_lowercase();
        let last = self.pick_str(LAST_NAMES).to_ascii_lowercase();
        let base = if self.rng.gen_bool(0.5) {
            format!("{first}{last}")
        } else {
            format!("{}{last}", &first[..1])
        };
        let suffix: u16 = self.rng.gen_range(100..=999);
        format!("{base}{suffix}")
    }

    /// A registration the server should accept.
    pub fn valid_registration(&mut self) -> UserRegistration {
        let password = self.valid_password();
        UserRegistration::new(
            self.pick_str(FIRST_NAMES),
            self.pick_str(LAST_NAMES),
            self.username(),
            password.clone(),
            password,
            self.pick_str(GENDERS),
        )
    }

    /// A registration the server should reject. Password and confirmation
    /// are generated independently and usually differ.
    pub fn invalid_registration(&mut self) -> UserRegistration {
        UserRegistration::new(
            self.pick_str(FIRST_NAMES),
            self.pick_str(LAST_NAMES),
            self.username(),
            self.invalid_password(),
            self.invalid_password(),
            self.pick_str(GENDERS),
        )
    }

    /// Picks the `bookId` of a random entry in a book-list response.
    pub fn random_book_id(&mut self, response: &HttpResponse) -> Result<u64, ApiError> {
        let books: Vec<BookRef> = response.json()?;
        books
            .choose(&mut self.rng)
            .map(|book| book.book_id)
            .ok_or(ApiError::EmptyCollection("books"))
    }

    fn pick_byte(&mut self, set: &[u8]) -> u8 {
        set[self.rng.gen_range(0..set.len())]
    }

    fn pick_str(&mut self, set: &[&'static str]) -> &'static str {
        set[self.rng.gen_range(0..set.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn data() -> TestData {
        TestData::from_json(
            r#"{
                "valid_users": [
                    {"username":"alpha","password":"Alpha123","userId":1,"userTypeName":"Admin"},
                    {"username":"beta","password":"Beta1234","userId":2,"userTypeName":"User"}
                ],
                "invalid_users": [
                    {"username":"alpha","password":"wrong","userId":1,"userTypeName":"Admin"}
                ],
                "expected_categories": [{"categoryId":1,"categoryName":"Biography"}]
            }"#,
        )
        .unwrap()
    }

    fn factory(seed: u64) -> DataFactory<StdRng> {
        DataFactory::new(data(), StdRng::seed_from_u64(seed))
    }

    fn books_response(ids: &[u64]) -> HttpResponse {
        let body: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| serde_json::json!({"bookId": id, "title": "t", "author": "a", "category": "c", "price": 1.0}))
            .collect();
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: serde_json::to_string(&body).unwrap(),
        }
    }

    #[test]
    fn valid_registrations_meet_policy_and_confirm() {
        let mut f = factory(1);
        for _ in 0..500 {
            let reg = f.valid_registration();
            assert_eq!(reg.password(), reg.confirm_password());
            assert!(meets_password_policy(reg.password()), "rejected {}", reg.password());
            assert!(GENDERS.contains(&reg.gender()));
        }
    }

    #[test]
    fn invalid_registrations_fail_policy() {
        let mut f = factory(2);
        for _ in 0..500 {
            let reg = f.invalid_registration();
            assert!(!meets_password_policy(reg.password()));
            assert!(!meets_password_policy(reg.confirm_password()));
            assert_eq!(reg.password().len(), INVALID_PASSWORD_LEN);
            assert!(reg.password().chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn username_ends_with_three_digit_suffix() {
        let mut f = factory(3);
        for _ in 0..200 {
            let name = f.username();
            let (base, suffix) = name.split_at(name.len() - 3);
            assert!(!base.is_empty());
            assert!(base.chars().all(|c| c.is_ascii_lowercase()));
            let n: u16 = suffix.parse().unwrap();
            assert!((100..=999).contains(&n));
        }
    }

    #[test]
    fn random_book_id_is_member_of_list() {
        let ids = [4, 8, 15, 16, 23, 42];
        let response = books_response(&ids);
        let mut f = factory(4);
        for _ in 0..100 {
            assert!(ids.contains(&f.random_book_id(&response).unwrap()));
        }
    }

    #[test]
    fn random_book_id_rejects_empty_list() {
        let err = factory(5).random_book_id(&books_response(&[])).unwrap_err();
        assert!(matches!(err, ApiError::EmptyCollection("books")));
    }

    #[test]
    fn random_book_id_rejects_non_list_body() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"bookId":1}"#.to_string(),
        };
        let err = factory(6).random_book_id(&response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn credentials_come_from_fixture() {
        let mut f = factory(7);
        for _ in 0..20 {
            let creds = f.valid_user_credentials().unwrap();
            assert!(f.test_data().valid_users.contains(&creds));
        }
        assert_eq!(f.invalid_user_credentials().unwrap().password, "wrong");
        assert_eq!(f.expected_categories().len(), 1);
    }

    #[test]
    fn empty_fixture_collection_is_an_error() {
        let mut f = DataFactory::new(TestData::default(), StdRng::seed_from_u64(8));
        assert!(matches!(
            f.valid_user_credentials(),
            Err(ApiError::EmptyCollection("valid_users"))
        ));
        assert!(matches!(
            f.invalid_user_credentials(),
            Err(ApiError::EmptyCollection("invalid_users"))
        ));
    }

    #[test]
    fn same_seed_same_output() {
        let a = factory(99).valid_registration();
        let b = factory(99).valid_registration();
        assert_eq!(a, b);
    }

    #[test]
    fn policy_predicate() {
        assert!(meets_password_policy("Abcdefg1"));
        assert!(!meets_password_policy("Abcdef1"));
        assert!(!meets_password_policy("abcdefg1"));
        assert!(!meets_password_policy("ABCDEFG1"));
        assert!(!meets_password_policy("Abcdefgh"));
        assert!(!meets_password_policy("Abcdef1!"));
    }
}
