//! Host probes and backends.
//!
//! In the browser the widget persists to `localStorage`, speaks through the
//! Web Speech API and registers an offline worker. Native builds persist to a
//! JSON file and fall back to alerts.

use std::cell::Cell;
use std::rc::Rc;

use lucky_wheel_core::{Capabilities, KeyValueStore, MemoryStore, SpeechSynth};

/// Everything the app needs from its host, resolved once at startup.
pub struct Host {
    pub capabilities: Capabilities,
    pub store: Box<dyn KeyValueStore>,
    pub speech: Option<Box<dyn SpeechSynth>>,
    /// Raised by the platform when its voice list changes.
    pub voices_changed: Rc<Cell<bool>>,
}

impl Host {
    /// Host with fixed capabilities and an in-memory store.
    pub fn in_memory(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            store: Box::new(MemoryStore::default()),
            speech: None,
            voices_changed: Rc::new(Cell::new(false)),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use lucky_wheel_core::{Capabilities, JsonFileStore, WheelConfig};
    use tracing::debug;

    use super::Host;

    impl Host {
        /// Native host: file-backed options when `data_dir` is given.
        ///
        /// There is no speech synthesis or offline worker; the configured
        /// user agent (if any) still selects the embedded code path.
        pub fn native(config: &WheelConfig, data_dir: Option<&Path>) -> Self {
            let user_agent = config.user_agent.as_deref().unwrap_or_default();
            let capabilities =
                Capabilities::resolve(user_agent, &config.embedded_marker, false, false);
            let mut host = Host::in_memory(capabilities);
            if let Some(dir) = data_dir {
                let store = JsonFileStore::in_dir(dir);
                debug!(path = %store.path().display(), "Using file-backed options");
                host.store = Box::new(store);
            }
            host
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;
    use std::rc::Rc;

    use lucky_wheel_core::{
        plan_registration, Capabilities, KeyValueStore, RegistrationPlan, SpeechSynth, Utterance,
        Voice, WheelConfig, WheelError, WheelResult,
    };
    use tracing::{debug, warn};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

    use super::Host;

    fn js_err(err: JsValue) -> WheelError {
        WheelError::storage(format!("{:?}", err))
    }

    fn has_property(target: &JsValue, name: &str) -> bool {
        js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
    }

    /// `window.localStorage`.
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Option<Self> {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            Some(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> WheelResult<Option<String>> {
            self.storage.get_item(key).map_err(js_err)
        }

        fn set(&mut self, key: &str, value: &str) -> WheelResult<()> {
            self.storage.set_item(key, value).map_err(js_err)
        }

        fn remove(&mut self, key: &str) -> WheelResult<()> {
            self.storage.remove_item(key).map_err(js_err)
        }
    }

    /// `window.speechSynthesis`.
    pub struct BrowserSpeech {
        synth: SpeechSynthesis,
        _on_voices_changed: Closure<dyn FnMut()>,
    }

    impl BrowserSpeech {
        /// `None` when the browser has no speech synthesis.
        pub fn new(flag: Rc<Cell<bool>>, ctx: egui::Context) -> Option<Self> {
            let window = web_sys::window()?;
            if !has_property(&window, "speechSynthesis") {
                return None;
            }
            let synth = window.speech_synthesis().ok()?;
            let on_voices_changed = Closure::<dyn FnMut()>::new(move || {
                flag.set(true);
                ctx.request_repaint();
            });
            synth.set_onvoiceschanged(Some(on_voices_changed.as_ref().unchecked_ref()));
            Some(Self {
                synth,
                _on_voices_changed: on_voices_changed,
            })
        }

        fn platform_voices(&self) -> Vec<SpeechSynthesisVoice> {
            self.synth
                .get_voices()
                .iter()
                .filter_map(|voice| voice.dyn_into::<SpeechSynthesisVoice>().ok())
                .collect()
        }
    }

    impl SpeechSynth for BrowserSpeech {
        fn voices(&self) -> Vec<Voice> {
            self.platform_voices()
                .iter()
                .map(|voice| Voice::new(voice.name(), voice.lang()))
                .collect()
        }

        fn speak(&mut self, utterance: Utterance) {
            let native = match SpeechSynthesisUtterance::new_with_text(&utterance.text) {
                Ok(native) => native,
                Err(err) => {
                    warn!(error = ?err, "Could not create utterance");
                    return;
                }
            };
            native.set_lang(&utterance.lang);
            native.set_rate(utterance.rate);
            native.set_pitch(utterance.pitch);
            native.set_volume(utterance.volume);
            if let Some(wanted) = &utterance.voice {
                let voice = self
                    .platform_voices()
                    .into_iter()
                    .find(|v| v.name() == wanted.name && v.lang() == wanted.lang);
                native.set_voice(voice.as_ref());
            }
            self.synth.speak(&native);
        }
    }

    /// Reported client identification string.
    pub fn user_agent() -> String {
        web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default()
    }

    fn offline_worker_supported() -> bool {
        web_sys::window()
            .map(|w| has_property(&w.navigator(), "serviceWorker"))
            .unwrap_or(false)
    }

    impl Host {
        /// Probe the browser once.
        pub fn browser(config: &WheelConfig, ctx: &egui::Context) -> Self {
            let voices_changed = Rc::new(Cell::new(false));
            let speech = BrowserSpeech::new(voices_changed.clone(), ctx.clone());
            let user_agent = config.user_agent.clone().unwrap_or_else(user_agent);
            let capabilities = Capabilities::resolve(
                &user_agent,
                &config.embedded_marker,
                speech.is_some(),
                offline_worker_supported(),
            );

            let mut host = Host::in_memory(capabilities);
            host.voices_changed = voices_changed;
            host.speech = speech.map(|s| Box::new(s) as Box<dyn SpeechSynth>);
            match LocalStorage::open() {
                Some(storage) => host.store = Box::new(storage),
                None => warn!("localStorage unavailable, options will not persist"),
            }
            host
        }
    }

    /// Register the offline caching worker when the plan allows it.
    pub fn register_offline_worker(capabilities: &Capabilities, path: &str) {
        let plan = plan_registration(capabilities, path);
        let RegistrationPlan::Register { path } = plan.clone() else {
            debug!(?plan, "Skipping offline worker registration");
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().service_worker().register(&path);
        wasm_bindgen_futures::spawn_local(async move {
            let result = wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| format!("{:?}", err));
            match &result {
                Ok(()) => web_sys::console::log_1(&"ServiceWorker registration successful".into()),
                Err(err) => web_sys::console::log_1(
                    &format!("ServiceWorker registration failed: {}", err).into(),
                ),
            }
            plan.report(result);
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::register_offline_worker;

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_wheel_core::WheelConfig;
    use tempfile::TempDir;

    #[test]
    fn test_native_host_defaults_to_standard_without_speech() {
        let host = Host::native(&WheelConfig::default(), None);
        assert!(!host.capabilities.is_embedded());
        assert!(!host.capabilities.has_speech());
        assert!(!host.capabilities.offline_cache);
        assert!(host.speech.is_none());
    }

    #[test]
    fn test_native_host_honors_user_agent_override() {
        let config = WheelConfig {
            user_agent: Some("Mozilla/5.0 MicroMessenger/8.0".to_string()),
            ..WheelConfig::default()
        };
        let host = Host::native(&config, None);
        assert!(host.capabilities.is_embedded());
    }

    #[test]
    fn test_native_host_uses_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = Host::native(&WheelConfig::default(), Some(temp_dir.path()));
        host.store.set("wheelOptions", "[]").unwrap();
        assert!(temp_dir.path().join("options.json").exists());
    }

    #[test]
    fn test_in_memory_host_keeps_capabilities() {
        let host = Host::in_memory(Capabilities::embedded());
        assert!(host.capabilities.is_embedded());
        assert!(!host.voices_changed.get());
    }
}
