//! Property-based tests for the form binder and session tokens

use std::collections::HashSet;

use proptest::prelude::*;
use serde::Deserialize;
use snipbox::backend::forms::decode;
use snipbox::backend::csrf::generate_token;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Note {
    title: String,
    content: String,
    expires: i32,
}

fn encode(fields: &[(&str, &str)]) -> Vec<u8> {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
        .into_bytes()
}

proptest! {
    #[test]
    fn test_any_text_binds_unchanged(title in "\\PC{0,100}", content in "\\PC{0,300}", expires in any::<i32>()) {
        let expires_text = expires.to_string();
        let body = encode(&[("title", &title), ("content", &content), ("expires", &expires_text)]);

        let note: Note = decode(&body).unwrap();

        prop_assert_eq!(note.title, title);
        prop_assert_eq!(note.content, content);
        prop_assert_eq!(note.expires, expires);
    }

    #[test]
    fn test_first_occurrence_of_a_key_wins(first in "[a-z]{1,20}", second in "[a-z]{1,20}") {
        let body = encode(&[("title", &first), ("title", &second)]);

        let note: Note = decode(&body).unwrap();

        prop_assert_eq!(note.title, first);
    }

    #[test]
    fn test_non_numeric_expiry_is_rejected(expires in "[a-z]{1,10}") {
        let body = encode(&[("expires", &expires)]);
        prop_assert!(decode::<Note>(&body).is_err());
    }

    #[test]
    fn test_csrf_tokens_are_unique_and_url_safe(count in 2usize..50) {
        let tokens: HashSet<String> = (0..count).map(|_| generate_token()).collect();
        prop_assert_eq!(tokens.len(), count);
        for token in &tokens {
            prop_assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
