/// Machine Translation Module
///
/// Everything that talks to, or stands in for, a translation provider.
///
/// # Overview
///
/// 1. **MT Trait & Providers** - `MachineTranslator` with a Google Translate implementation
///    and a deterministic mock
/// 2. **Token Shield** - Swaps links and references for sentinels the provider leaves alone
/// 3. **Provider Outcome** - Sorts a provider answer into translated, retry later, or fatal
/// 4. **Throttle** - Fixed pause after each provider call
///
/// # Example
///
/// ```ignore
/// use mem_translate::mt::{MachineTranslator, GoogleTranslateProvider, ProviderOutcome, shield};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let shielded = shield("success, see {Qapla':n}");
///     let provider = GoogleTranslateProvider::from_env()?;
///     let result = provider.translate(&shielded.text, "en", "de").await;
///     if let ProviderOutcome::Translated(text) = ProviderOutcome::from(result) {
///         println!("{}", shielded.unshield(&text).text);
///     }
///     Ok(())
/// }
/// ```
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod shield;
pub mod throttle;
pub mod translator;

pub use error::{MtError, MtResult, ProviderOutcome};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use shield::{ProtectedSpan, ShieldedText, Unshielded, is_verbatim, shield, unshield};
pub use throttle::Throttle;
pub use translator::MachineTranslator;
