//! Result announcements: speech when the host allows it, alerts otherwise.

use tracing::{debug, info};

use crate::environment::Capabilities;

/// Spoken (or shown) when the voice test button is pressed.
pub const TEST_MESSAGE: &str = "语音测试：这是一条测试语音";

/// Voice test advisory inside the embedded browser.
pub const EMBEDDED_TEST_ADVISORY: &str = "微信浏览器中语音播报可能受限，但功能正常。";

/// Voice test message when speech synthesis is missing.
pub const UNSUPPORTED_TEST_MESSAGE: &str = "抱歉，您的浏览器不支持语音合成功能。";

/// Announcement text for a spin result.
pub fn result_message(label: &str) -> String {
    format!("恭喜！抽中了：{}", label)
}

/// A platform voice as reported by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. `zh-CN`.
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// A fully configured utterance ready to hand to the synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// `None` means the platform default voice.
    pub voice: Option<Voice>,
}

impl Utterance {
    fn new(text: String, lang: &str) -> Self {
        Self {
            text,
            lang: lang.to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            voice: None,
        }
    }
}

/// Platform speech synthesizer.
pub trait SpeechSynth {
    /// Currently known voices; may be empty until the platform populates it.
    fn voices(&self) -> Vec<Voice>;

    /// Queue an utterance. Fire-and-forget.
    fn speak(&mut self, utterance: Utterance);
}

impl<T: SpeechSynth + ?Sized> SpeechSynth for Box<T> {
    fn voices(&self) -> Vec<Voice> {
        (**self).voices()
    }

    fn speak(&mut self, utterance: Utterance) {
        (**self).speak(utterance)
    }
}

/// Synthesizer for hosts without speech support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechSynth for NoSpeech {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, _utterance: Utterance) {}
}

/// Pick the first voice matching the language family of `locale`.
///
/// For Chinese the Mandarin tag `cmn` and voice names mentioning "Chinese"
/// also count as a match.
pub fn select_voice<'a>(voices: &'a [Voice], locale: &str) -> Option<&'a Voice> {
    let family = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if family.is_empty() {
        return None;
    }
    voices.iter().find(|voice| {
        let lang = voice.lang.to_ascii_lowercase();
        lang.contains(&family)
            || (family == "zh" && (lang.contains("cmn") || voice.name.contains("Chinese")))
    })
}

/// What an announcement turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Show a modal alert with this text.
    Alert(String),
    /// Handed to the synthesizer.
    Spoken,
    /// Waiting for the platform voice list.
    Deferred,
}

/// Turns results into user-perceptible notifications.
pub struct Announcer<S> {
    capabilities: Capabilities,
    locale: String,
    speech: Option<S>,
    /// Only the latest deferred utterance is kept.
    pending: Option<Utterance>,
}

impl<S: SpeechSynth> Announcer<S> {
    /// `speech` is only consulted when `capabilities` report speech support.
    pub fn new(capabilities: Capabilities, locale: impl Into<String>, speech: Option<S>) -> Self {
        Self {
            capabilities,
            locale: locale.into(),
            speech,
            pending: None,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn speech(&self) -> Option<&S> {
        self.speech.as_ref()
    }

    /// Utterances waiting for the voice list (zero or one).
    pub fn pending(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    /// Announce `text`, or the fixed test message when `is_test`.
    pub fn announce(&mut self, text: &str, is_test: bool) -> Announcement {
        let message = if is_test {
            TEST_MESSAGE.to_string()
        } else {
            result_message(text)
        };

        if self.capabilities.is_embedded() {
            debug!(is_test, "Embedded browser, announcing via alert");
            return Announcement::Alert(if is_test {
                EMBEDDED_TEST_ADVISORY.to_string()
            } else {
                message
            });
        }

        let speech = match self.speech.as_mut() {
            Some(speech) if self.capabilities.has_speech() => speech,
            _ => {
                debug!(is_test, "Speech unavailable, announcing via alert");
                return Announcement::Alert(if is_test {
                    UNSUPPORTED_TEST_MESSAGE.to_string()
                } else {
                    message
                });
            }
        };

        let mut utterance = Utterance::new(message, &self.locale);
        let voices = speech.voices();
        if voices.is_empty() {
            if let Some(replaced) = self.pending.replace(utterance) {
                debug!(text = %replaced.text, "Dropping superseded deferred utterance");
            }
            debug!("Voice list not ready, deferring utterance");
            return Announcement::Deferred;
        }

        utterance.voice = select_voice(&voices, &self.locale).cloned();
        info!(text = %utterance.text, voice = ?utterance.voice.as_ref().map(|v| &v.name), "Speaking");
        speech.speak(utterance);
        Announcement::Spoken
    }

    /// Flush the deferred utterance once the platform reports its voices.
    ///
    /// Returns how many utterances were dispatched. Nothing is sent while the
    /// list is still empty.
    pub fn voices_changed(&mut self) -> usize {
        let Some(speech) = self.speech.as_mut() else {
            return 0;
        };
        if self.pending.is_none() {
            return 0;
        }
        let voices = speech.voices();
        if voices.is_empty() {
            return 0;
        }
        let Some(mut utterance) = self.pending.take() else {
            return 0;
        };
        utterance.voice = select_voice(&voices, &self.locale).cloned();
        info!(text = %utterance.text, "Dispatched deferred utterance");
        speech.speak(utterance);
        1
    }
}
