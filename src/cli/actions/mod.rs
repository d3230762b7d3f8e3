pub mod server;

/// What the process was asked to do.
#[derive(Debug)]
pub enum Action {
    /// Serve the calculation API until a shutdown signal arrives.
    Server(server::Args),
}

impl Action {
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Server(args) => server::execute(args).await,
        }
    }
}
