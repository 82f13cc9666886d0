use serde::Serialize;

/// Standard envelope for successful data responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Advisory messages grouped by severity, as returned on the JSON
/// mutation surface. Dangers share the warning bucket.
#[derive(Debug, Serialize)]
pub struct MessageGroups {
    pub success: Vec<String>,
    pub warning: Vec<String>,
}

/// Outcome of a save / confirm / delete call on the JSON surface.
///
/// `result` reflects whether the request reached the domain at all;
/// individual record rejections still come back as `result: true`
/// with advisories in `messages.warning`.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub result: bool,
    pub messages: MessageGroups,
}

impl OutcomeResponse {
    pub fn new(result: bool, success: Vec<String>, warning: Vec<String>) -> Self {
        Self {
            result,
            messages: MessageGroups { success, warning },
        }
    }
}
