/// 環境変数と実行環境の管理
pub mod environment;

pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, BackendConfig,
    EnvVarError, Environment, EnvironmentConfig,
};
