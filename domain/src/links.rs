//! Outbound links to Steam profiles and WhatsApp conversations.

pub const DEFAULT_CONTACT_MESSAGE: &str = "Olá! Vi o site do SeuLobato e tenho interesse em fazer parte do time de Counter-Strike. Podemos conversar?";

const RECRUITING_MESSAGE_TEMPLATE: &str = "Olá Lobato! Vi as vagas abertas no time SeuLobato e gostaria de saber mais sobre a posição de {role}. Tenho interesse em participar dos treinos!";

const UNKNOWN_ROLE: &str = "uma das posições";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhatsAppTarget {
    /// `whatsapp://` scheme, opened by the mobile app.
    App,
    Web,
}

pub fn steam_profile_url(steam_id64: &str) -> String {
    format!("https://steamcommunity.com/profiles/{}/", steam_id64.trim())
}

/// Recruiting message for an open position; a blank role falls back to a generic wording.
pub fn recruiting_message(role: &str) -> String {
    let role = match role.trim() {
        "" => UNKNOWN_ROLE,
        role => role,
    };
    RECRUITING_MESSAGE_TEMPLATE.replace("{role}", role)
}

/// `phone` is in international format; anything that is not a digit is dropped.
pub fn whatsapp_url(phone: &str, message: &str, target: WhatsAppTarget) -> String {
    let phone: String = phone.chars().filter(char::is_ascii_digit).collect();
    let text = urlencoding::encode(message);
    match target {
        WhatsAppTarget::App => format!("whatsapp://send?phone={phone}&text={text}"),
        WhatsAppTarget::Web => format!("https://web.whatsapp.com/send?phone={phone}&text={text}"),
    }
}
