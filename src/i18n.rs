// src/i18n.rs — 界面文案表（en / es / pt / fr / ru / zh）

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Es,
    Pt,
    Fr,
    Ru,
    Zh,
}

impl Language {
    /// 语言选择器中的顺序，也是 next() 的循环顺序
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Pt,
        Language::Fr,
        Language::Ru,
        Language::Zh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Pt => "pt",
            Language::Fr => "fr",
            Language::Ru => "ru",
            Language::Zh => "zh",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Pt => "Português",
            Language::Fr => "Français",
            Language::Ru => "Русский",
            Language::Zh => "中文",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Pt => &PT,
            Language::Fr => &FR,
            Language::Ru => &RU,
            Language::Zh => &ZH,
        }
    }
}

/// 按语言代码查表，未知代码回退到英文；`Strings::lang` 给出实际命中的语言
pub fn lookup(code: &str) -> &'static Strings {
    Language::from_code(code).unwrap_or_default().strings()
}

/// 文案键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    AppTitle,
    QrCode,
    UrlShortener,
    TextMode,
    WifiMode,
    EnterText,
    NetworkName,
    EnterWifiName,
    Password,
    EnterPassword,
    SecurityType,
    NoSecurity,
    Color,
    Preview,
    Download,
    Downloaded,
    EnterUrl,
    Shorten,
    Shortening,
    Success,
    Error,
    ShortenFailed,
    InvalidUrl,
    Language,
}

impl Key {
    #[cfg(test)]
    pub const ALL: [Key; 24] = [
        Key::AppTitle,
        Key::QrCode,
        Key::UrlShortener,
        Key::TextMode,
        Key::WifiMode,
        Key::EnterText,
        Key::NetworkName,
        Key::EnterWifiName,
        Key::Password,
        Key::EnterPassword,
        Key::SecurityType,
        Key::NoSecurity,
        Key::Color,
        Key::Preview,
        Key::Download,
        Key::Downloaded,
        Key::EnterUrl,
        Key::Shorten,
        Key::Shortening,
        Key::Success,
        Key::Error,
        Key::ShortenFailed,
        Key::InvalidUrl,
        Key::Language,
    ];
}

/// 一种语言的全部文案；字段齐全由编译器保证，只能经 get(Key) 读取
#[derive(Debug, PartialEq, Eq)]
pub struct Strings {
    pub lang: Language,
    app_title: &'static str,
    qr_code: &'static str,
    url_shortener: &'static str,
    text_mode: &'static str,
    wifi_mode: &'static str,
    enter_text: &'static str,
    network_name: &'static str,
    enter_wifi_name: &'static str,
    password: &'static str,
    enter_password: &'static str,
    security_type: &'static str,
    no_security: &'static str,
    color: &'static str,
    preview: &'static str,
    download: &'static str,
    downloaded: &'static str,
    enter_url: &'static str,
    shorten: &'static str,
    shortening: &'static str,
    success: &'static str,
    error: &'static str,
    shorten_failed: &'static str,
    invalid_url: &'static str,
    language: &'static str,
}

impl Strings {
    pub fn get(&self, key: Key) -> &'static str {
        match key {
            Key::AppTitle => self.app_title,
            Key::QrCode => self.qr_code,
            Key::UrlShortener => self.url_shortener,
            Key::TextMode => self.text_mode,
            Key::WifiMode => self.wifi_mode,
            Key::EnterText => self.enter_text,
            Key::NetworkName => self.network_name,
            Key::EnterWifiName => self.enter_wifi_name,
            Key::Password => self.password,
            Key::EnterPassword => self.enter_password,
            Key::SecurityType => self.security_type,
            Key::NoSecurity => self.no_security,
            Key::Color => self.color,
            Key::Preview => self.preview,
            Key::Download => self.download,
            Key::Downloaded => self.downloaded,
            Key::EnterUrl => self.enter_url,
            Key::Shorten => self.shorten,
            Key::Shortening => self.shortening,
            Key::Success => self.success,
            Key::Error => self.error,
            Key::ShortenFailed => self.shorten_failed,
            Key::InvalidUrl => self.invalid_url,
            Key::Language => self.language,
        }
    }
}

static EN: Strings = Strings {
    lang: Language::En,
    app_title: "QR Code & URL Shortener",
    qr_code: "QR Code",
    url_shortener: "URL Shortener",
    text_mode: "Text / URL",
    wifi_mode: "WiFi",
    enter_text: "Enter text or URL",
    network_name: "Network name",
    enter_wifi_name: "Enter WiFi name",
    password: "Password",
    enter_password: "Enter WiFi password",
    security_type: "Security type",
    no_security: "No security",
    color: "QR color",
    preview: "Preview",
    download: "Download QR Code",
    downloaded: "QR code downloaded",
    enter_url: "Enter long URL",
    shorten: "Shorten URL",
    shortening: "Shortening...",
    success: "Success",
    error: "Error",
    shorten_failed: "Failed to shorten URL",
    invalid_url: "Please enter a valid URL",
    language: "Language",
};

static ES: Strings = Strings {
    lang: Language::Es,
    app_title: "Código QR y acortador de URL",
    qr_code: "Código QR",
    url_shortener: "Acortador de URL",
    text_mode: "Texto / URL",
    wifi_mode: "WiFi",
    enter_text: "Introduce texto o URL",
    network_name: "Nombre de la red",
    enter_wifi_name: "Introduce el nombre del WiFi",
    password: "Contraseña",
    enter_password: "Introduce la contraseña del WiFi",
    security_type: "Tipo de seguridad",
    no_security: "Sin seguridad",
    color: "Color del QR",
    preview: "Vista previa",
    download: "Descargar código QR",
    downloaded: "Código QR descargado",
    enter_url: "Introduce la URL larga",
    shorten: "Acortar URL",
    shortening: "Acortando...",
    success: "Éxito",
    error: "Error",
    shorten_failed: "No se pudo acortar la URL",
    invalid_url: "Introduce una URL válida",
    language: "Idioma",
};

static PT: Strings = Strings {
    lang: Language::Pt,
    app_title: "Código QR e encurtador de URL",
    qr_code: "Código QR",
    url_shortener: "Encurtador de URL",
    text_mode: "Texto / URL",
    wifi_mode: "WiFi",
    enter_text: "Digite texto ou URL",
    network_name: "Nome da rede",
    enter_wifi_name: "Digite o nome do WiFi",
    password: "Senha",
    enter_password: "Digite a senha do WiFi",
    security_type: "Tipo de segurança",
    no_security: "Sem segurança",
    color: "Cor do QR",
    preview: "Pré-visualizar",
    download: "Baixar código QR",
    downloaded: "Código QR baixado",
    enter_url: "Digite a URL longa",
    shorten: "Encurtar URL",
    shortening: "Encurtando...",
    success: "Sucesso",
    error: "Erro",
    shorten_failed: "Falha ao encurtar a URL",
    invalid_url: "Digite uma URL válida",
    language: "Idioma",
};

static FR: Strings = Strings {
    lang: Language::Fr,
    app_title: "Code QR et raccourcisseur d'URL",
    qr_code: "Code QR",
    url_shortener: "Raccourcisseur d'URL",
    text_mode: "Texte / URL",
    wifi_mode: "WiFi",
    enter_text: "Saisissez un texte ou une URL",
    network_name: "Nom du réseau",
    enter_wifi_name: "Saisissez le nom du WiFi",
    password: "Mot de passe",
    enter_password: "Saisissez le mot de passe du WiFi",
    security_type: "Type de sécurité",
    no_security: "Aucune sécurité",
    color: "Couleur du QR",
    preview: "Aperçu",
    download: "Télécharger le code QR",
    downloaded: "Code QR téléchargé",
    enter_url: "Saisissez l'URL longue",
    shorten: "Raccourcir l'URL",
    shortening: "Raccourcissement...",
    success: "Succès",
    error: "Erreur",
    shorten_failed: "Impossible de raccourcir l'URL",
    invalid_url: "Veuillez saisir une URL valide",
    language: "Langue",
};

static RU: Strings = Strings {
    lang: Language::Ru,
    app_title: "QR-код и сокращение ссылок",
    qr_code: "QR-код",
    url_shortener: "Сокращение ссылок",
    text_mode: "Текст / URL",
    wifi_mode: "WiFi",
    enter_text: "Введите текст или URL",
    network_name: "Имя сети",
    enter_wifi_name: "Введите имя WiFi",
    password: "Пароль",
    enter_password: "Введите пароль WiFi",
    security_type: "Тип защиты",
    no_security: "Без защиты",
    color: "Цвет QR",
    preview: "Предпросмотр",
    download: "Скачать QR-код",
    downloaded: "QR-код сохранён",
    enter_url: "Введите длинную ссылку",
    shorten: "Сократить ссылку",
    shortening: "Сокращаем...",
    success: "Готово",
    error: "Ошибка",
    shorten_failed: "Не удалось сократить ссылку",
    invalid_url: "Введите корректную ссылку",
    language: "Язык",
};

static ZH: Strings = Strings {
    lang: Language::Zh,
    app_title: "二维码与短链接",
    qr_code: "二维码",
    url_shortener: "短链接",
    text_mode: "文本 / 网址",
    wifi_mode: "WiFi",
    enter_text: "输入文本或网址",
    network_name: "网络名称",
    enter_wifi_name: "输入 WiFi 名称",
    password: "密码",
    enter_password: "输入 WiFi 密码",
    security_type: "加密类型",
    no_security: "无加密",
    color: "二维码颜色",
    preview: "预览",
    download: "下载二维码",
    downloaded: "二维码已下载",
    enter_url: "输入长网址",
    shorten: "生成短链接",
    shortening: "生成中...",
    success: "成功",
    error: "错误",
    shorten_failed: "短链接生成失败",
    invalid_url: "请输入有效的网址",
    language: "语言",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_english() {
        assert_eq!(lookup("xx"), lookup("en"));
        assert_eq!(lookup(""), &EN);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("ZH"), &ZH);
        assert_eq!(lookup(" fr "), &FR);
    }

    #[test]
    fn lookup_reports_the_resolved_language() {
        assert_eq!(lookup("pt").lang, Language::Pt);
        assert_eq!(lookup("klingon").lang, Language::En);
        for lang in Language::ALL {
            assert_eq!(lang.strings().lang, lang);
        }
    }

    #[test]
    fn next_cycles_through_all_languages() {
        let mut lang = Language::En;
        let mut seen = vec![];
        for _ in 0..Language::ALL.len() {
            seen.push(lang.code());
            lang = lang.next();
        }
        assert_eq!(seen, ["en", "es", "pt", "fr", "ru", "zh"]);
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn every_table_is_complete() {
        for lang in Language::ALL {
            for key in Key::ALL {
                assert!(
                    !lang.strings().get(key).is_empty(),
                    "{} 缺少 {key:?}",
                    lang.code()
                );
            }
        }
    }
}
