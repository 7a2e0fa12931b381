/// A settled request. Only `body` reaches the response display; the rest is
/// reported in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: String,
    pub duration_ms: u128,
    pub size_bytes: usize,
    pub body: String,
}
