use crate::domain::EmailAddress;
use crate::page::{Color, Page, Visibility};

pub const MISSING_EMAIL_MESSAGE: &str = "You must enter an email address.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Ids of the elements a guard reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardIds {
    pub input_id: String,
    pub status_id: String,
    pub submit_id: String,
    pub loading_container_id: String,
}

impl GuardIds {
    /// The email form: `email` input, `status` region, `vbutton` submit. The
    /// loading indicator replaces the status message.
    pub fn email_form() -> GuardIds {
        GuardIds {
            input_id: "email".into(),
            status_id: "status".into(),
            submit_id: "vbutton".into(),
            loading_container_id: "status".into(),
        }
    }

    /// The test-account form, which has no input of its own.
    pub fn test_account_form() -> GuardIds {
        GuardIds {
            input_id: "email".into(),
            status_id: "status".into(),
            submit_id: "lbutton".into(),
            loading_container_id: "loadingframe".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    src: String,
}

impl LoadingIndicator {
    pub fn new(src: impl Into<String>) -> LoadingIndicator {
        LoadingIndicator { src: src.into() }
    }

    pub fn markup(&self) -> String {
        format!("<img src='{}' />", htmlescape::encode_minimal(&self.src))
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        LoadingIndicator::new("static/blocks.gif")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Missing,
    Invalid,
    Accepted(EmailAddress),
}

/// Blocks submission of the email form until the input holds an address.
#[derive(Debug, Clone)]
pub struct FormGuard {
    ids: GuardIds,
    indicator: LoadingIndicator,
}

impl FormGuard {
    pub fn new(ids: GuardIds, indicator: LoadingIndicator) -> FormGuard {
        FormGuard { ids, indicator }
    }

    pub fn ids(&self) -> &GuardIds {
        &self.ids
    }

    pub fn check(&self, value: &str) -> Verdict {
        if value.is_empty() {
            return Verdict::Missing;
        }
        match EmailAddress::parse(value.to_string()) {
            Ok(email) => Verdict::Accepted(email),
            Err(_) => Verdict::Invalid,
        }
    }

    /// Returns `true` when the submission may proceed. Either way the status
    /// region is overwritten with the outcome.
    pub fn validate_and_submit(&self, page: &mut Page) -> bool {
        let verdict = self.check(page.value(&self.ids.input_id));
        self.apply(&verdict, page)
    }

    pub fn apply(&self, verdict: &Verdict, page: &mut Page) -> bool {
        match verdict {
            Verdict::Missing => {
                self.reject(page, MISSING_EMAIL_MESSAGE);
                false
            }
            Verdict::Invalid => {
                self.reject(page, INVALID_EMAIL_MESSAGE);
                false
            }
            Verdict::Accepted(_) => {
                page.element_mut(&self.ids.submit_id).visibility =
                    Visibility::Hidden;
                page.element_mut(&self.ids.loading_container_id)
                    .set_markup(self.indicator.markup());
                true
            }
        }
    }

    fn reject(&self, page: &mut Page, message: &str) {
        let status = page.element_mut(&self.ids.status_id);
        status.set_text(message);
        status.color = Some(Color::Red);
    }
}

/// Swaps a button for the loading indicator without validating anything.
#[derive(Debug, Clone)]
pub struct LoadGuard {
    ids: GuardIds,
    indicator: LoadingIndicator,
}

impl LoadGuard {
    pub fn new(ids: GuardIds, indicator: LoadingIndicator) -> LoadGuard {
        LoadGuard { ids, indicator }
    }

    pub fn begin_loading(&self, page: &mut Page) -> bool {
        page.element_mut(&self.ids.submit_id).visibility = Visibility::Hidden;
        page.element_mut(&self.ids.loading_container_id)
            .set_markup(self.indicator.markup());
        true
    }
}
