/// Localized SMS string tables
use crate::routing::countries::Language;

/// Every phrase the composer can emit, in one language.
pub struct Strings {
    pub emergency_alert: &'static str,
    pub is_in_danger: &'static str,
    pub emergency_words_detected: &'static str,
    pub loud_noise_detected: &'static str,
    pub emergency_detected: &'static str,
    pub live_tracking: &'static str,
    pub location: &'static str,
    pub incident: &'static str,
    pub time: &'static str,
    pub from: &'static str,
    pub confidence: &'static str,
    pub confirm_prompt: &'static str,
    pub system_test: &'static str,
    pub system_ready: &'static str,
}

pub const EN: Strings = Strings {
    emergency_alert: "EMERGENCY ALERT",
    is_in_danger: "is in DANGER!",
    emergency_words_detected: "Emergency words detected",
    loud_noise_detected: "Sudden loud noise detected",
    emergency_detected: "Emergency situation detected",
    live_tracking: "LIVE TRACKING",
    location: "Location",
    incident: "Incident",
    time: "Time",
    from: "From",
    confidence: "Confidence",
    confirm_prompt: "Reply YES to confirm",
    system_test: "SYSTEM TEST",
    system_ready: "System ready for",
};

pub const ES: Strings = Strings {
    emergency_alert: "ALERTA DE EMERGENCIA",
    is_in_danger: "está en PELIGRO!",
    emergency_words_detected: "Palabras de emergencia detectadas",
    loud_noise_detected: "Ruido fuerte repentino detectado",
    emergency_detected: "Situación de emergencia detectada",
    live_tracking: "RASTREO EN VIVO",
    location: "Ubicación",
    incident: "Incidente",
    time: "Hora",
    from: "De",
    confidence: "Confianza",
    confirm_prompt: "Responda SI para confirmar",
    system_test: "PRUEBA DEL SISTEMA",
    system_ready: "Sistema listo para",
};

pub fn strings_for(language: Language) -> &'static Strings {
    match language {
        Language::En => &EN,
        Language::Es => &ES,
    }
}
