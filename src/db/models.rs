use serde::Serialize;
use uuid::Uuid;

/// A registered account. Deliberately not `Serialize`: the password hash and
/// the API key leave the store only through registration's one-time response.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Survey {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub question: String,
    pub yes_count: i64,
    pub no_count: i64,
}

/// A yes/no ballot. Only the French tokens "oui" and "non" are accepted on
/// the wire, in any letter case; everything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("oui") {
            Some(Answer::Yes)
        } else if token.eq_ignore_ascii_case("non") {
            Some(Answer::No)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_oui_and_non_in_any_case() {
        assert_eq!(Answer::parse("oui"), Some(Answer::Yes));
        assert_eq!(Answer::parse("OUI"), Some(Answer::Yes));
        assert_eq!(Answer::parse("Non"), Some(Answer::No));
        assert_eq!(Answer::parse("nOn"), Some(Answer::No));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(Answer::parse("yes"), None);
        assert_eq!(Answer::parse("no"), None);
        assert_eq!(Answer::parse("oui "), None);
        assert_eq!(Answer::parse(""), None);
        assert_eq!(Answer::parse("peut-être"), None);
    }
}
