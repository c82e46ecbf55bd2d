/// Visible state of a contact form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }

    /// `Success` and `Error` wait for the next interaction.
    pub fn is_resting(&self) -> bool {
        matches!(self, SubmissionStatus::Success | SubmissionStatus::Error)
    }

    pub fn accepts_submit(&self) -> bool {
        !self.is_pending()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    pub fn banner(&self, contact_address: &str) -> Option<Banner> {
        match self {
            SubmissionStatus::Idle | SubmissionStatus::Pending => None,
            SubmissionStatus::Success => Some(Banner {
                kind: BannerKind::Success,
                headline: "Message sent successfully! I'll get back to you soon.".to_string(),
                detail: None,
            }),
            SubmissionStatus::Error => Some(Banner {
                kind: BannerKind::Error,
                headline: "Unable to send message through the form.".to_string(),
                detail: Some(format!(
                    "Your email client should open as a backup. Or email me directly at {}",
                    contact_address
                )),
            }),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub headline: String,
    pub detail: Option<String>,
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.headline)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n{}", detail)?;
        }
        Ok(())
    }
}
