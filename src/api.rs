use crate::{
    config::Config,
    network::{ModuleRegistry, Network},
    tasks::TaskStore,
};

/// Shared handle to the service configuration and external collaborators. All operation
/// APIs are implemented as extensions over this struct.
pub struct Api<TS: TaskStore, MR: ModuleRegistry> {
    pub config: Config,
    pub store: TS,
    pub network: Network<MR>,
}

impl<TS: TaskStore, MR: ModuleRegistry> Api<TS, MR> {
    /// Instantiates APIs collection with the specified config, task store, and network.
    pub fn new(config: Config, store: TS, network: Network<MR>) -> Self {
        Self {
            config,
            store,
            network,
        }
    }
}

impl<TS: TaskStore, MR: ModuleRegistry> AsRef<Api<TS, MR>> for Api<TS, MR> {
    fn as_ref(&self) -> &Self {
        self
    }
}
