//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    L10nSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: L10nSettings,

    /// 設定ファイルのあるディレクトリ（見つからない場合は探索を始めたディレクトリ）
    config_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: L10nSettings::default(), config_root: None }
    }

    /// 設定を読み込む
    ///
    /// `config_root` から親ディレクトリへ遡って設定ファイルを探す。
    /// `translationsRoot` が相対パスの場合は設定ファイルのあるディレクトリを基準に解決する
    ///
    /// # Arguments
    /// * `config_root` - 設定ファイルの探索を始めるディレクトリ
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_root);

        let (mut settings, config_dir) = match config_root {
            Some(root) => match loader::load_from_workspace(&root)? {
                Some(loaded) => {
                    tracing::debug!("Loaded settings file: {:?}", loaded.settings);
                    (loaded.settings, Some(loaded.directory))
                }
                None => (L10nSettings::default(), Some(root)),
            },
            None => (L10nSettings::default(), None),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        if let Some(dir) = &config_dir
            && settings.translations_root.is_relative()
        {
            settings.translations_root = dir.join(&settings.translations_root);
        }

        self.current_settings = settings;
        self.config_root = config_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn update_settings(&mut self, new_settings: L10nSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &L10nSettings {
        &self.current_settings
    }

    /// 設定の基準ディレクトリを取得
    #[must_use]
    pub const fn config_root(&self) -> Option<&PathBuf> {
        self.config_root.as_ref()
    }
}
