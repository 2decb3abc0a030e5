//! Account registry: the mock connect operation
//!
//! Connecting never talks to a real provider. The external account id is
//! synthesized from the provider name and the current time, which is enough
//! for the offline demo flow this engine serves.

use tracing::debug;

use crate::clock::Clock;
use crate::state::DashboardState;
use crate::util::uid;
use crate::{Account, Provider};

/// Create a connected-account record and append it to the state.
///
/// Always succeeds: there is no real OAuth handshake to fail.
pub fn connect(state: &mut DashboardState, provider: Provider, clock: &dyn Clock) -> Account {
    let connected_at = clock.now();
    let account = Account {
        id: uid("acc"),
        provider,
        provider_account_id: format!("{provider}_fake_{}", connected_at.timestamp_millis()),
        display_name: format!("{} Demo", provider.capitalized()),
        connected_at,
    };

    debug!("{provider} connected (mock) as {}", account.id);
    state.accounts.push(account.clone());
    account
}
