// clients_interests Use Case

use super::MethodOutcome;
use crate::application::context::Audit;
use crate::domain::ClientsInterestsArgs;
use crate::error::Result;
use crate::port::Scoring;
use serde_json::{Map, Value};

/// Execute clients_interests
///
/// Calls the collaborator once per id, in request order. The payload maps
/// each id (as a string key) to its interests; a repeated id keeps its first
/// position. `nclients` counts every id, repeats included.
pub fn execute(scoring: &dyn Scoring, args: &ClientsInterestsArgs) -> Result<MethodOutcome> {
    let mut interests = Map::with_capacity(args.client_ids.len());

    for client_id in &args.client_ids {
        let items = scoring.get_interests(*client_id)?;
        interests.insert(client_id.to_string(), Value::from(items));
    }

    Ok(MethodOutcome {
        payload: Value::Object(interests),
        audit: Audit::Clients(args.client_ids.len()),
    })
}
