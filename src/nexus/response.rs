use reqwest::StatusCode;

/// How a remote call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The server reported the change as already in place.
    AlreadyDone,
    Failed,
}

impl Outcome {
    /// Success and benign outcomes both leave the server in the desired state.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Success | Self::AlreadyDone)
    }
}

/// Status codes an operation treats as success and as a benign no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected {
    pub success: StatusCode,
    pub benign: Option<(StatusCode, &'static str)>,
}

impl Expected {
    pub const CHANGE_PASSWORD: Expected = Expected::new(StatusCode::NO_CONTENT);
    pub const DELETE_REPOSITORY: Expected = Expected::new(StatusCode::NO_CONTENT);
    pub const CREATE_PROXY_REPOSITORY: Expected = Expected::new(StatusCode::CREATED);
    pub const DELETE_CONTENT_SELECTOR: Expected = Expected::new(StatusCode::NO_CONTENT);
    // Nexus answers a duplicate selector with a 500
    pub const CREATE_CONTENT_SELECTOR: Expected = Expected::new(StatusCode::NO_CONTENT)
        .or_benign(StatusCode::INTERNAL_SERVER_ERROR, "already exists");
    pub const DELETE_PRIVILEGE: Expected = Expected::new(StatusCode::NO_CONTENT);
    pub const CREATE_PRIVILEGE: Expected =
        Expected::new(StatusCode::CREATED).or_benign(StatusCode::BAD_REQUEST, "already exists");
    pub const DELETE_ROLE: Expected = Expected::new(StatusCode::NO_CONTENT);
    pub const CREATE_ROLE: Expected =
        Expected::new(StatusCode::OK).or_benign(StatusCode::BAD_REQUEST, "already exists");
    pub const UPDATE_ROLE: Expected =
        Expected::new(StatusCode::NO_CONTENT).or_benign(StatusCode::NOT_FOUND, "does not exist");
    pub const ENABLE_ANONYMOUS: Expected = Expected::new(StatusCode::OK);
    pub const UPDATE_USER: Expected = Expected::new(StatusCode::NO_CONTENT);

    pub const fn new(success: StatusCode) -> Self {
        Self {
            success,
            benign: None,
        }
    }

    pub const fn or_benign(self, status: StatusCode, reason: &'static str) -> Self {
        Self {
            success: self.success,
            benign: Some((status, reason)),
        }
    }

    #[must_use]
    pub fn classify(&self, status: StatusCode) -> Outcome {
        if status == self.success {
            return Outcome::Success;
        }
        match self.benign {
            Some((benign, _)) if benign == status => Outcome::AlreadyDone,
            _ => Outcome::Failed,
        }
    }

    /// Log message for a benign status.
    #[must_use]
    pub fn benign_reason(&self) -> &'static str {
        self.benign.map_or("", |(_, reason)| reason)
    }
}
