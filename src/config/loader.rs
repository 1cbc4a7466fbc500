//! 設定ファイルの探索と読み込み

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    L10nSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".l10n.json";

/// 読み込んだ設定ファイル
#[derive(Debug)]
pub(super) struct LoadedConfig {
    /// 設定ファイルが置かれたディレクトリ
    pub directory: PathBuf,
    pub settings: L10nSettings,
}

/// `start` から親ディレクトリへ遡って設定ファイルを探す
///
/// 最初に見つかった `.l10n.json` のパスを返す
pub(super) fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// 設定ファイルを読み込む
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_path(config_path: &Path) -> Result<L10nSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// `start` 以上のディレクトリから設定を読み込む
///
/// # Returns
/// - `Ok(Some(config))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: どの階層にも設定ファイルがない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(start: &Path) -> Result<Option<LoadedConfig>, ConfigError> {
    let Some(config_path) = find_config_file(start) else {
        tracing::debug!("Configuration file not found above: {:?}", start);
        return Ok(None);
    };

    let settings = load_from_path(&config_path)?;
    let directory = config_path.parent().map_or_else(|| start.to_path_buf(), Path::to_path_buf);

    Ok(Some(LoadedConfig { directory, settings }))
}
