// Per-request audit context

use serde::Serialize;

/// Audit metadata produced by a method handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audit {
    /// online_score: names of the supplied non-empty fields
    Has(Vec<&'static str>),
    /// clients_interests: number of client ids processed
    Clients(usize),
}

/// Side record for one in-flight request.
///
/// Created by the transport, filled by the dispatcher, read back for logging.
/// Never shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nclients: Option<usize>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, audit: Audit) {
        match audit {
            Audit::Has(fields) => {
                self.has = Some(fields.into_iter().map(String::from).collect());
            }
            Audit::Clients(count) => self.nclients = Some(count),
        }
    }
}
