use crate::config::Settings;

/// Settings plus the reason defaults were used instead, if they were.
///
/// The reason is printed right away and handed back so it can be logged once
/// the log sink is up; the sink itself is configured by these settings.
pub fn load_settings() -> (Settings, Option<String>) {
    let fallback = match Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => return (s, None),
            Err(msg) => format!("invalid config, using defaults: {msg}"),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => format!("failed to load config, using defaults: {e}"),
    };
    eprintln!("tracklist: {fallback}");
    (Settings::default(), Some(fallback))
}
