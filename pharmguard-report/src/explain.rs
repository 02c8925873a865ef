//! Best-effort natural language explanations for (gene, drug) pairs.
//!
//! Explanations are layered on top of a finished deterministic result. A
//! failed, slow or cancelled explanation only ever costs its own text; the
//! caller substitutes [`PLACEHOLDER_EXPLANATION`] for anything missing.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError, at, bounded, never, select};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::json;

use pharmguard_core::models::{GeneResult, Phenotype, RecommendationEntry};

use crate::config::ExplainConfig;
use crate::error::ExplainError;

pub const PLACEHOLDER_EXPLANATION: &str =
    "LLM explanation unavailable — results are based on deterministic CPIC guidelines.";

const SYSTEM_PROMPT: &str = "You are a Senior Clinical Pharmacologist and CPIC Guideline expert. \
Provide concise, evidence-based, two-part explanations of drug-gene interactions: one for \
clinicians and one patient-friendly.";

const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 500;

///
/// Everything an explainer needs to describe one (gene, drug) pair.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainRequest {
    pub gene: String,
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub drug: String,
    pub risk_label: String,
}

impl ExplainRequest {
    pub fn new(gene_result: &GeneResult, recommendation: &RecommendationEntry) -> Self {
        ExplainRequest {
            gene: recommendation.gene.clone(),
            diplotype: gene_result.diplotype.to_string(),
            phenotype: gene_result.phenotype,
            drug: recommendation.drug.clone(),
            risk_label: recommendation.risk_label.clone(),
        }
    }

    pub fn pair_key(&self) -> String {
        format!("{}:{}", self.gene, self.drug)
    }

    ///
    /// The two-part user prompt: a mechanistic summary for clinicians and a
    /// plain-language summary for the patient.
    ///
    pub fn prompt(&self) -> String {
        let phenotype = self.phenotype.description();
        let outcome = match self.risk_label.as_str() {
            "Safe" => "SAFE",
            "Toxic" => "TOXIC",
            "Adjust Dosage" => "requires DOSAGE ADJUSTMENT",
            other => other,
        };

        format!(
            "Provide a two-part clinical summary for a patient with {gene} {phenotype} \
(diplotype: {diplotype}) status taking {drug}.

Part 1: Professional Mechanistic Summary (For Clinicians)
- Mechanism: Explain the specific enzyme-drug interaction (e.g., prodrug activation vs. active \
drug clearance) using technical terms like pharmacokinetic (PK) impact.
- Justification: State why the {phenotype} phenotype makes the drug {outcome} based on expected \
systemic concentrations.
- Evidence: Explicitly state the CPIC Recommendation level (e.g., Level A: Strong).

Part 2: Patient-Friendly Summary (Easy to Understand)
- The Analogy: Use a simple \"Engine\" analogy (e.g., \"Your body processes this like a very \
fast engine\").
- The 'So What?': In 2 sentences of 5th-grade level English, explain what this means for their \
treatment (e.g., \"This medicine may not work for you, and we might need to try a different \
one\").

Format your response clearly with \"**For Your Doctor:**\" and \"**For You:**\" section headers.",
            gene = self.gene,
            phenotype = phenotype,
            diplotype = self.diplotype,
            drug = self.drug,
            outcome = outcome,
        )
    }
}

///
/// A collaborator that turns one pair into explanatory text.
///
/// `timeout` is what is left of the enrichment budget when the call starts;
/// implementations should not block for longer than that.
///
pub trait Explainer: Send + Sync {
    fn explain(&self, request: &ExplainRequest, timeout: Duration) -> Result<String, ExplainError>;
}

#[derive(Deserialize, Debug)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

///
/// Explainer backed by an OpenAI-compatible chat completions endpoint.
///
pub struct HttpExplainer {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl HttpExplainer {
    pub fn new(endpoint: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpExplainer {
            agent,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    ///
    /// Build an explainer from config, reading the API key from the
    /// environment variable the config names.
    ///
    pub fn from_config(config: &ExplainConfig) -> Result<Self, ExplainError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ExplainError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(HttpExplainer::new(
            &config.endpoint,
            &config.model,
            &api_key,
            config.timeout(),
        ))
    }
}

impl Explainer for HttpExplainer {
    fn explain(&self, request: &ExplainRequest, timeout: Duration) -> Result<String, ExplainError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": request.prompt() },
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response: ChatResponse = self
            .agent
            .post(&self.endpoint)
            .timeout(self.timeout.min(timeout))
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)?
            .into_json()?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ExplainError::EmptyResponse)
    }
}

///
/// Explain every request concurrently, one worker thread per pair.
///
/// Collection stops when every worker has answered, when `budget` has
/// elapsed, or when `cancel` receives a message (or disconnects), whichever
/// comes first. Whatever arrived by then is returned, keyed by
/// `GENE:DRUG`; failed pairs are simply absent.
///
/// Once collection stops, workers that have not yet called the explainer
/// skip their call, and every call that does start is handed only the
/// budget that remains.
///
/// # Arguments
/// - explainer: the collaborator shared by all workers
/// - requests: the pairs to explain
/// - budget: wall-clock limit for the whole fan-out
/// - cancel: optional cancellation signal
pub fn enrich(
    explainer: Arc<dyn Explainer>,
    requests: &[ExplainRequest],
    budget: Duration,
    cancel: Option<&Receiver<()>>,
) -> HashMap<String, String> {
    let mut explanations = HashMap::new();
    if requests.is_empty() {
        return explanations;
    }

    if let Some(cancel) = cancel {
        match cancel.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => {
                info!("Explanation enrichment cancelled before it started");
                return explanations;
            }
            Err(TryRecvError::Empty) => {}
        }
    }

    let deadline_at = Instant::now() + budget;
    let stop = Arc::new(AtomicBool::new(false));

    // capacity for every answer, so late workers never block on a dropped receiver
    let (tx, rx) = bounded(requests.len());

    for request in requests.iter().cloned() {
        let tx = tx.clone();
        let explainer = Arc::clone(&explainer);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let remaining = deadline_at.saturating_duration_since(Instant::now());
            if stop.load(Ordering::SeqCst) || remaining.is_zero() {
                debug!("Skipping explanation for {}", request.pair_key());
                return;
            }
            let result = explainer.explain(&request, remaining);
            let _ = tx.send((request.pair_key(), result));
        });
    }
    drop(tx);

    let deadline = at(deadline_at);
    let no_cancel = never();
    let cancel = cancel.unwrap_or(&no_cancel);

    let mut pending = requests.len();
    while pending > 0 {
        select! {
            recv(rx) -> msg => match msg {
                Ok((key, Ok(text))) => {
                    debug!("Explanation received for {}", key);
                    explanations.insert(key, text);
                    pending -= 1;
                }
                Ok((key, Err(e))) => {
                    warn!("Explanation failed for {}: {}", key, e);
                    pending -= 1;
                }
                Err(_) => break,
            },
            recv(deadline) -> _ => {
                warn!(
                    "Explanation budget of {:?} exhausted with {} pair(s) pending",
                    budget, pending
                );
                break;
            },
            recv(cancel) -> _ => {
                info!("Explanation enrichment cancelled with {} pair(s) pending", pending);
                break;
            },
        }
    }
    stop.store(true, Ordering::SeqCst);

    explanations
}

///
/// Explanation text for a pair, or the placeholder when none arrived.
///
pub fn explanation_for(explanations: &HashMap<String, String>, pair_key: &str) -> String {
    explanations
        .get(pair_key)
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_EXPLANATION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    struct EchoExplainer;

    impl Explainer for EchoExplainer {
        fn explain(&self, request: &ExplainRequest, _timeout: Duration) -> Result<String, ExplainError> {
            Ok(format!("{} and {}", request.gene, request.drug))
        }
    }

    /// Fails for one gene, sleeps for another, echoes the rest.
    struct FlakyExplainer {
        failing_gene: &'static str,
        slow_gene: &'static str,
        delay: Duration,
    }

    impl Explainer for FlakyExplainer {
        fn explain(&self, request: &ExplainRequest, _timeout: Duration) -> Result<String, ExplainError> {
            if request.gene == self.failing_gene {
                return Err(ExplainError::Request("connection refused".to_string()));
            }
            if request.gene == self.slow_gene {
                thread::sleep(self.delay);
            }
            Ok(format!("{} and {}", request.gene, request.drug))
        }
    }

    /// Counts calls and keeps the timeout each call was given.
    #[derive(Default)]
    struct CountingExplainer {
        calls: AtomicUsize,
        timeouts: Mutex<Vec<Duration>>,
    }

    impl Explainer for CountingExplainer {
        fn explain(&self, request: &ExplainRequest, timeout: Duration) -> Result<String, ExplainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.timeouts.lock().unwrap().push(timeout);
            Ok(request.pair_key())
        }
    }

    fn request(gene: &str, drug: &str) -> ExplainRequest {
        ExplainRequest {
            gene: gene.to_string(),
            diplotype: "*1/*4".to_string(),
            phenotype: Phenotype::IM,
            drug: drug.to_string(),
            risk_label: "Adjust Dosage".to_string(),
        }
    }

    #[fixture]
    fn requests() -> Vec<ExplainRequest> {
        vec![
            request("CYP2D6", "CODEINE"),
            request("CYP2C9", "WARFARIN"),
            request("DPYD", "FLUOROURACIL"),
        ]
    }

    #[rstest]
    fn test_all_pairs_explained(requests: Vec<ExplainRequest>) {
        let explanations = enrich(Arc::new(EchoExplainer), &requests, Duration::from_secs(5), None);

        assert_eq!(explanations.len(), 3);
        assert_eq!(explanations["CYP2C9:WARFARIN"], "CYP2C9 and WARFARIN");
    }

    #[rstest]
    fn test_failure_and_timeout_leave_gaps(requests: Vec<ExplainRequest>) {
        let explainer = FlakyExplainer {
            failing_gene: "DPYD",
            slow_gene: "CYP2C9",
            delay: Duration::from_secs(3),
        };

        let start = Instant::now();
        let explanations = enrich(
            Arc::new(explainer),
            &requests,
            Duration::from_millis(300),
            None,
        );

        assert!(start.elapsed() < Duration::from_secs(2));
        assert_eq!(explanations.len(), 1);
        assert_eq!(
            explanation_for(&explanations, "CYP2D6:CODEINE"),
            "CYP2D6 and CODEINE"
        );
        assert_eq!(
            explanation_for(&explanations, "CYP2C9:WARFARIN"),
            PLACEHOLDER_EXPLANATION
        );
        assert_eq!(
            explanation_for(&explanations, "DPYD:FLUOROURACIL"),
            PLACEHOLDER_EXPLANATION
        );
    }

    #[rstest]
    fn test_cancel_stops_collection(requests: Vec<ExplainRequest>) {
        let slow = || {
            Arc::new(FlakyExplainer {
                failing_gene: "NONE",
                slow_gene: "CYP2C9",
                delay: Duration::from_secs(3),
            })
        };
        let (cancel_tx, cancel_rx) = bounded(1);
        cancel_tx.send(()).unwrap();

        let explanations = enrich(
            slow(),
            &[requests[1].clone()],
            Duration::from_secs(10),
            Some(&cancel_rx),
        );
        assert!(explanations.is_empty());

        // a live cancel channel that never fires changes nothing
        let (_keep_alive, quiet_rx) = bounded::<()>(1);
        let explanations = enrich(
            slow(),
            &[requests[0].clone()],
            Duration::from_secs(10),
            Some(&quiet_rx),
        );
        assert_eq!(explanations.len(), 1);
    }

    #[rstest]
    fn test_cancelled_enrichment_makes_no_calls(requests: Vec<ExplainRequest>) {
        let explainer = Arc::new(CountingExplainer::default());
        let (cancel_tx, cancel_rx) = bounded(1);
        cancel_tx.send(()).unwrap();

        let explanations = enrich(
            explainer.clone(),
            &requests,
            Duration::from_secs(10),
            Some(&cancel_rx),
        );
        assert!(explanations.is_empty());

        // give any stray worker time to run
        thread::sleep(Duration::from_millis(500));
        assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn test_exhausted_budget_makes_no_calls(requests: Vec<ExplainRequest>) {
        let explainer = Arc::new(CountingExplainer::default());

        let explanations = enrich(explainer.clone(), &requests, Duration::ZERO, None);
        assert!(explanations.is_empty());

        thread::sleep(Duration::from_millis(500));
        assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn test_calls_get_the_remaining_budget(requests: Vec<ExplainRequest>) {
        let explainer = Arc::new(CountingExplainer::default());
        let budget = Duration::from_secs(5);

        let explanations = enrich(explainer.clone(), &requests, budget, None);
        assert_eq!(explanations.len(), 3);

        let timeouts = explainer.timeouts.lock().unwrap();
        assert_eq!(timeouts.len(), 3);
        assert!(timeouts.iter().all(|t| *t <= budget && !t.is_zero()));
    }

    #[rstest]
    fn test_empty_requests() {
        let explanations = enrich(Arc::new(EchoExplainer), &[], Duration::from_secs(1), None);
        assert!(explanations.is_empty());
    }

    #[rstest]
    #[case("Toxic", "TOXIC")]
    #[case("Adjust Dosage", "requires DOSAGE ADJUSTMENT")]
    #[case("Ineffective", "Ineffective")]
    fn test_prompt_mentions_outcome(#[case] risk_label: &str, #[case] outcome: &str) {
        let mut req = request("CYP2D6", "CODEINE");
        req.risk_label = risk_label.to_string();

        let prompt = req.prompt();
        assert!(prompt.contains("CYP2D6 Intermediate Metabolizer (diplotype: *1/*4)"));
        assert!(prompt.contains(&format!("makes the drug {} based on", outcome)));
        assert!(prompt.contains("**For Your Doctor:**"));
    }

    #[rstest]
    fn test_missing_api_key() {
        let config = ExplainConfig {
            api_key_env: "PHARMGUARD_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpExplainer::from_config(&config),
            Err(ExplainError::MissingApiKey(_))
        ));
    }
}
