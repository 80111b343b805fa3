mod assets;
mod config_env;
mod helpers;
mod themes;
