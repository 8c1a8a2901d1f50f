//! Static message catalog for the supported UI languages.

use crate::domain::Locale;
use crate::ports::MessageProvider;

/// Message catalog bound to one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    fn pick(&self, en: &str, ru: &str) -> String {
        let text = match self.locale {
            Locale::En => en,
            Locale::Ru => ru,
        };
        text.to_string()
    }

    // Screen chrome, used by the terminal UI only.

    pub fn token_prompt(&self) -> String {
        self.pick("Personal access token:", "Персональный токен доступа:")
    }

    pub fn signing_in(&self) -> String {
        self.pick("Signing in...", "Выполняется вход...")
    }

    pub fn repositories(&self) -> String {
        self.pick("Repositories", "Репозитории")
    }

    pub fn no_repositories(&self) -> String {
        self.pick("No repositories found.", "Репозитории не найдены.")
    }

    pub fn no_license(&self) -> String {
        self.pick("No license", "Без лицензии")
    }
}

impl MessageProvider for Catalog {
    fn enter_token(&self) -> String {
        self.pick("Enter the token", "Введите токен")
    }

    fn server_not_responding(&self) -> String {
        self.pick("Server is not responding", "Сервер не отвечает")
    }

    fn connection_error(&self) -> String {
        self.pick(
            "Connection error. Check your network",
            "Ошибка соединения. Проверьте подключение к сети",
        )
    }

    fn undescribed_error(&self) -> String {
        self.pick("Unexpected error:", "Непредвиденная ошибка:")
    }
}
