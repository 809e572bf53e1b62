/// Localized alert composition with a hard SMS length budget
use crate::constants::{MAX_SMS_CHARS, SMS_SIGNATURE};
use crate::message::templates::{strings_for, Strings};
use crate::models::{DetectionData, DetectionType, LocationInput};
use crate::routing::CountryProfile;
use chrono::Utc;

/// Everything the composer needs to render one alert message.
pub struct AlertDetails<'a> {
    pub victim_name: &'a str,
    pub detection_type: &'a DetectionType,
    pub detection_data: &'a DetectionData,
    pub location: Option<&'a LocationInput>,
    pub incident_id: &'a str,
    pub tracking_url: Option<&'a str>,
}

/// Renders the alert SMS for a destination profile.
///
/// The full template carries the danger statement, detection detail,
/// tracking link (where the profile allows URLs), location, incident id,
/// timestamp, and signature. If that exceeds the single-segment budget the
/// message is re-rendered with the short template, which always fits.
pub fn compose_alert(details: &AlertDetails<'_>, profile: &CountryProfile) -> String {
    let strings = strings_for(profile.language);

    let full = render_full(details, profile, strings);
    if full.chars().count() <= MAX_SMS_CHARS {
        return full;
    }

    let short = render_short(details, strings);
    if short.chars().count() <= MAX_SMS_CHARS {
        short
    } else {
        short.chars().take(MAX_SMS_CHARS).collect()
    }
}

fn danger_statement(details: &AlertDetails<'_>, strings: &Strings) -> String {
    format!(
        "{}: {} {}",
        strings.emergency_alert, details.victim_name, strings.is_in_danger
    )
}

fn detection_line(details: &AlertDetails<'_>, strings: &Strings) -> String {
    match details.detection_type {
        DetectionType::EmergencyWords => {
            let words = if details.detection_data.detected_words.is_empty() {
                "emergency".to_string()
            } else {
                details.detection_data.detected_words.join(", ")
            };
            format!("{}: {}", strings.emergency_words_detected, words)
        }
        DetectionType::AbruptNoise => match details.detection_data.volume {
            Some(volume) => format!("{}: {volume} dB", strings.loud_noise_detected),
            None => strings.loud_noise_detected.to_string(),
        },
        DetectionType::Generic => strings.emergency_detected.to_string(),
    }
}

fn render_full(
    details: &AlertDetails<'_>,
    profile: &CountryProfile,
    strings: &Strings,
) -> String {
    let mut message = danger_statement(details, strings);
    message.push('\n');
    message.push_str(&detection_line(details, strings));

    if let Some(confidence) = details.detection_data.confidence {
        message.push_str(&format!(
            "\n{}: {}%",
            strings.confidence,
            confidence_percent(confidence)
        ));
    }

    if profile.include_tracking_url {
        if let Some(url) = details.tracking_url {
            message.push_str(&format!("\n\n{}:\n{url}", strings.live_tracking));
        }
    }

    if let Some(location) = details.location {
        message.push_str(&format!(
            "\n\n{}: {}",
            strings.location,
            location_label(location, profile.include_tracking_url)
        ));
    }

    message.push_str(&format!("\n\n{}: {}", strings.incident, details.incident_id));
    message.push_str(&format!(
        "\n{}: {}",
        strings.time,
        Utc::now().format("%H:%M:%S")
    ));
    message.push_str(&format!("\n{}: {}", strings.from, SMS_SIGNATURE));
    message
}

fn render_short(details: &AlertDetails<'_>, strings: &Strings) -> String {
    let mut message = danger_statement(details, strings);
    if let Some(location) = details.location {
        if let (Some(lat), Some(lon)) = (location.latitude, location.longitude) {
            message.push_str(&format!(" {lat:.4},{lon:.4}"));
        }
    }
    message.push_str(&format!(" {}", strings.confirm_prompt));
    message
}

// A map link only stands in for a missing place name where the destination
// carriers pass URLs through.
fn location_label(location: &LocationInput, allow_url: bool) -> String {
    if let Some(name) = &location.place_name {
        return name.clone();
    }
    if allow_url {
        if let Some(link) = &location.map_link {
            return link.clone();
        }
    }
    match (location.latitude, location.longitude) {
        (Some(lat), Some(lon)) => format!("{lat:.5},{lon:.5}"),
        _ => "Unknown Location".to_string(),
    }
}

/// Integer percentage with round-half-up semantics, so 0.865 reads as 87%.
pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence * 100.0 + 0.5).floor().clamp(0.0, 100.0) as u32
}

/// Renders the localized system-test SMS.
pub fn compose_test(victim_name: &str, profile: &CountryProfile) -> String {
    let strings = strings_for(profile.language);
    format!(
        "{}: {} {}\n{}: {}\n{}: {}",
        strings.system_test,
        strings.system_ready,
        victim_name,
        strings.location,
        profile.name,
        strings.from,
        SMS_SIGNATURE
    )
}
