pub mod config;
pub mod dashboard;
pub mod refresh;
pub mod runtime;
pub mod state;
pub mod wallet;

pub use config::{DashboardConfig, DelayConfig, SimulationConfig};
pub use dashboard::Dashboard;
pub use refresh::RefreshHandle;
pub use runtime::{Clock, InstantSleeper, ManualClock, Sleeper, SystemClock, TokioSleeper};
pub use state::{ActionKey, ActionStatus, AppState, LoadingFlags};
pub use wallet::{MockWalletProvider, WalletProvider};
