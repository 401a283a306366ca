use serde::{Deserialize, Serialize};

use crate::domain::{DraftText, Username};

/// Body the server answers with once a tweet is stored.
pub const NEW_TWEET_SUCCESS_BODY: &str = "success";

/// Form fields of `POST /{user}/tweets/new`, sent url-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTweetForm {
    pub text: String,
}

impl From<DraftText> for NewTweetForm {
    fn from(value: DraftText) -> Self {
        Self {
            text: value.into_inner(),
        }
    }
}

pub fn new_tweet_path(user: &Username) -> String {
    format!("/{user}/tweets/new")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_embeds_the_user_identifier() {
        let user = Username::parse("alice").expect("username");
        assert_eq!(new_tweet_path(&user), "/alice/tweets/new");
    }

    #[test]
    fn form_carries_the_draft_verbatim() {
        let form = NewTweetForm::from(DraftText::new("hello world"));
        assert_eq!(form.text, "hello world");
    }
}
