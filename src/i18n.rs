use dioxus_i18n::prelude::*;

/// Initialize i18n configuration with Vietnamese as default language
pub fn init_i18n() -> I18nConfig {
    I18nConfig::new(unic_langid::langid!("vi-VN")).with_locale(Locale::new_static(
        unic_langid::langid!("vi-VN"),
        include_str!("../locales/vi-VN.ftl"),
    ))
}
