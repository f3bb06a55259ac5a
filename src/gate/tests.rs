use super::*;
use std::sync::Arc;

fn scripted_gate(
    similarity: f32,
    relevance: f32,
) -> (SemanticGate, Arc<ScriptedSimilarity>, Arc<ScriptedRelevance>) {
    let sim = Arc::new(ScriptedSimilarity::constant(similarity));
    let rel = Arc::new(ScriptedRelevance::constant(relevance));
    let gate = SemanticGate::new(ModelRegistry::new(sim.clone(), rel.clone()));
    (gate, sim, rel)
}

mod decision_tests {
    use super::*;

    #[test]
    fn test_identical_candidate_rejected_without_models() {
        let (gate, sim, rel) = scripted_gate(1.0, 1.0);

        assert!(!gate.accepts("What is x?", "What is x?").unwrap());
        assert_eq!(
            gate.evaluate("What is x?", "  WHAT IS X?\n").unwrap(),
            GateDecision::Unchanged
        );
        assert_eq!(sim.call_count(), 0);
        assert_eq!(rel.call_count(), 0);
    }

    #[test]
    fn test_low_similarity_skips_cross_encoder() {
        let (gate, sim, rel) = scripted_gate(0.5, 1.0);

        let decision = gate.evaluate("What is x?", "Name the capital.").unwrap();

        assert_eq!(decision, GateDecision::LowSimilarity { similarity: 0.5 });
        assert_eq!(sim.call_count(), 1);
        assert_eq!(rel.call_count(), 0);
    }

    #[test]
    fn test_low_relevance_rejects() {
        let (gate, _, rel) = scripted_gate(0.95, 0.4);

        let decision = gate.evaluate("What is x?", "What value does x take?").unwrap();

        assert!(matches!(decision, GateDecision::LowRelevance { .. }));
        assert!(!decision.is_accepted());
        assert_eq!(rel.call_count(), 1);
    }

    #[test]
    fn test_nan_similarity_rejects() {
        let (gate, _, rel) = scripted_gate(f32::NAN, 1.0);

        let decision = gate.evaluate("What is x?", "What value does x take?").unwrap();

        assert!(matches!(decision, GateDecision::LowSimilarity { similarity } if similarity.is_nan()));
        assert_eq!(rel.call_count(), 0);
    }

    #[test]
    fn test_nan_relevance_rejects() {
        let (gate, _, _) = scripted_gate(0.95, f32::NAN);

        let decision = gate.evaluate("What is x?", "What value does x take?").unwrap();

        assert!(matches!(decision, GateDecision::LowRelevance { .. }));
        assert!(!gate.accepts("What is x?", "What value does x take?").unwrap());
    }

    #[test]
    fn test_both_stages_pass() {
        let (gate, _, _) = scripted_gate(0.92, 0.88);

        let decision = gate.evaluate("What is x?", "What value does x take?").unwrap();
        assert_eq!(
            decision,
            GateDecision::Accepted {
                similarity: 0.92,
                relevance: 0.88
            }
        );
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let (gate, _, _) = scripted_gate(BI_ENCODER_THRESHOLD, CROSS_ENCODER_THRESHOLD);
        assert!(gate.accepts("a b", "a b c").unwrap());

        let (gate, _, _) = scripted_gate(0.7999, 0.99);
        assert!(!gate.accepts("a b", "a b c").unwrap());

        let (gate, _, _) = scripted_gate(0.99, 0.7499);
        assert!(!gate.accepts("a b", "a b c").unwrap());
    }

    #[test]
    fn test_model_failure_is_an_error_not_a_rejection() {
        let gate = SemanticGate::new(ModelRegistry::new(
            Arc::new(FailingSimilarity),
            Arc::new(ScriptedRelevance::constant(1.0)),
        ));

        let err = gate.evaluate("What is x?", "What value is x?").unwrap_err();
        assert!(matches!(err, GateError::Similarity(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(GateDecision::Unchanged.to_string(), "UNCHANGED");
        assert_eq!(
            GateDecision::LowSimilarity { similarity: 0.5 }.to_string(),
            "LOW_SIMILARITY (similarity: 0.5000)"
        );
        assert_eq!(GateDecision::Unchanged.debug_status(), "UNCHANGED");
    }
}

mod stub_registry_tests {
    use super::*;

    #[test]
    fn test_stub_registry_status() {
        let registry = ModelRegistry::stub().unwrap();
        assert_eq!(
            registry.status(),
            RegistryStatus {
                bi_encoder: ModelBackend::Stub,
                cross_encoder: ModelBackend::Stub,
            }
        );
    }

    #[test]
    fn test_scripted_registry_status() {
        let (gate, _, _) = scripted_gate(1.0, 1.0);
        assert_eq!(gate.registry().status().bi_encoder, ModelBackend::Scripted);
    }

    #[test]
    fn test_self_pair_never_accepted() {
        let gate = SemanticGate::new(ModelRegistry::stub().unwrap());
        for text in ["What is x?", "", "Explain photosynthesis in two sentences."] {
            assert!(!gate.accepts(text, text).unwrap());
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let gate = SemanticGate::new(ModelRegistry::stub().unwrap());
        let original = "Which of the following is not a prime number?";
        let candidate = "Which of the following numbers is not prime?";

        let first = gate.evaluate(original, candidate).unwrap();
        let second = gate.evaluate(original, candidate).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrelated_candidate_rejected_by_stubs() {
        let gate = SemanticGate::new(ModelRegistry::stub().unwrap());
        let decision = gate
            .evaluate(
                "Describe the water cycle.",
                "List three causes of the French Revolution.",
            )
            .unwrap();
        assert!(!decision.is_accepted());
    }
}

mod logging_tests {
    use super::*;
    use crate::embedding::{BiEncoderConfig, RerankerConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            if *meta.level() == tracing::Level::WARN && !meta.target().ends_with("::device") {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_stub_registry_warns_once() {
        let counter = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());

        let registry = tracing::subscriber::with_default(subscriber, || {
            ModelRegistry::load(BiEncoderConfig::default(), RerankerConfig::default()).unwrap()
        });

        assert_eq!(registry.status().bi_encoder, ModelBackend::Stub);
        assert_eq!(registry.status().cross_encoder, ModelBackend::Stub);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
