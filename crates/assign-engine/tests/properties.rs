//! Property-based tests for the analyzer and the assignment engine
//!
//! Rosters and ticket batches are generated at random; the properties must
//! hold for every generated input.

use std::collections::BTreeMap;

use helpdesk_assign_engine::prelude::*;
use proptest::prelude::*;

const SKILLS: [&str; 4] = ["Networking", "Database_SQL", "Printer_Support", "Cloud_AWS"];

/// Words that appear in no urgency keyword and no negation marker
const NEUTRAL_WORDS: [&str; 10] = [
    "the", "office", "coffee", "chair", "window", "lunch", "blue", "desk", "parking", "plant",
];

fn agent_strategy() -> impl Strategy<Value = (Vec<u8>, u32, u32, bool)> {
    (
        prop::collection::vec(0u8..=10, SKILLS.len()),
        0u32..30,
        0u32..8,
        prop::bool::weighted(0.8),
    )
}

fn roster_strategy() -> impl Strategy<Value = Vec<Agent>> {
    prop::collection::vec(agent_strategy(), 0..6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (levels, experience, workload, available))| {
                let mut agent = Agent::new(format!("agent_{:03}", i), format!("Agent {}", i))
                    .with_experience(experience)
                    .with_workload(workload);
                for (skill, level) in SKILLS.iter().zip(levels) {
                    agent = agent.with_skill(skill, level);
                }
                if !available {
                    agent = agent.with_status(AvailabilityStatus::Busy);
                }
                agent
            })
            .collect()
    })
}

fn tickets_strategy() -> impl Strategy<Value = Vec<Ticket>> {
    let ticket = (0u32..8, prop::option::of(0usize..SKILLS.len() + 1));
    prop::collection::vec(ticket, 0..25).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (urgency, skill))| {
                // coarse scores so ties are common
                let score = f64::from(urgency) * 2.5;
                let ticket = Ticket::new(
                    format!("TKT-{:03}", i),
                    "generated",
                    i,
                    PriorityAssessment::manual(UrgencyTier::Medium, score),
                );
                match skill {
                    Some(index) if index < SKILLS.len() => ticket.requiring_skill(SKILLS[index]),
                    Some(_) => ticket.requiring_skill("Unheld_Skill"),
                    None => ticket,
                }
            })
            .collect()
    })
}

fn engine(relax: bool) -> AssignmentEngine {
    let mut config = EngineConfig::default();
    config.eligibility.relax_skill_requirement = relax;
    AssignmentEngine::new(config).expect("valid config")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: one decision per ticket, ranks 1..=n
    #[test]
    fn one_decision_per_ticket(
        agents in roster_strategy(),
        tickets in tickets_strategy(),
        relax in any::<bool>()
    ) {
        let decisions = engine(relax).assign(&tickets, &agents);
        prop_assert_eq!(decisions.len(), tickets.len());

        let ranks: Vec<usize> = decisions.iter().map(|d| d.rank).collect();
        let expected: Vec<usize> = (1..=tickets.len()).collect();
        prop_assert_eq!(ranks, expected);

        let mut ids: Vec<&str> = decisions.iter().map(|d| d.ticket_id.as_ref()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), tickets.len());
    }

    /// Property: workload at each decision is baseline plus earlier
    /// assignments to the same agent
    #[test]
    fn workload_accounting(
        agents in roster_strategy(),
        tickets in tickets_strategy()
    ) {
        let decisions = engine(true).assign(&tickets, &agents);
        let mut assigned: BTreeMap<&str, u32> = BTreeMap::new();

        for decision in &decisions {
            if let Some(agent_id) = &decision.agent_id {
                let agent = agents.iter().find(|a| &a.id == agent_id).expect("known agent");
                prop_assert!(agent.is_available());
                let earlier = assigned.get(agent_id.as_ref()).copied().unwrap_or(0);
                prop_assert_eq!(decision.workload_at_decision, Some(agent.baseline_workload + earlier));
                *assigned.entry(agent_id.as_ref()).or_insert(0) += 1;
            } else {
                prop_assert!(decision.workload_at_decision.is_none());
            }
        }
    }

    /// Property: final workloads reported by a run equal baseline plus the
    /// decisions naming each agent
    #[test]
    fn final_workloads_match_decisions(
        agents in roster_strategy(),
        urgencies in prop::collection::vec(0usize..4, 0..20)
    ) {
        let texts = ["Server down", "Printer is slow", "Question about SQL", "Suggestion for the wiki"];
        let dataset = Dataset {
            agents: agents
                .iter()
                .map(|agent| {
                    let mut record = AgentRecord::new(agent.id.as_ref());
                    record.skills = Some(agent.skills.iter().map(|(s, l)| (s.clone(), i64::from(*l))).collect());
                    record.availability_status = Some(agent.status.to_string());
                    record.experience_level = Some(i64::from(agent.experience_level));
                    record.current_load = Some(i64::from(agent.baseline_workload));
                    record
                })
                .collect(),
            tickets: urgencies
                .iter()
                .enumerate()
                .map(|(i, u)| TicketRecord::new(&format!("TKT-{}", i), texts[*u]))
                .collect(),
        };

        let run = engine(true).run(&dataset);
        prop_assert!(run.failures.is_empty());
        for agent in &agents {
            let named = run
                .decisions
                .iter()
                .filter(|d| d.agent_id.as_ref() == Some(&agent.id))
                .count() as u32;
            prop_assert_eq!(run.final_workloads[&agent.id], agent.baseline_workload + named);
        }
    }

    /// Property: identical input gives identical output
    #[test]
    fn assignment_is_deterministic(
        agents in roster_strategy(),
        tickets in tickets_strategy()
    ) {
        let engine = engine(true);
        let first = engine.assign(&tickets, &agents);
        let second = engine.assign(&tickets, &agents);
        prop_assert_eq!(
            serde_json::to_string(&first).expect("serializes"),
            serde_json::to_string(&second).expect("serializes")
        );
    }

    /// Property: a strictly more urgent ticket is never decided later
    #[test]
    fn urgency_order_respected(
        agents in roster_strategy(),
        tickets in tickets_strategy()
    ) {
        let decisions = engine(true).assign(&tickets, &agents);
        for pair in decisions.windows(2) {
            prop_assert!(pair[0].urgency_score >= pair[1].urgency_score);
        }
        for a in &decisions {
            for b in &decisions {
                if a.urgency_score > b.urgency_score {
                    prop_assert!(a.rank < b.rank);
                }
            }
        }
    }

    /// Property: with no available agent every ticket is unassigned
    #[test]
    fn no_available_agent_means_unassigned(tickets in tickets_strategy()) {
        let agents = vec![
            Agent::new("agent_001", "A").with_status(AvailabilityStatus::Offline),
            Agent::new("agent_002", "B").with_status(AvailabilityStatus::OnLeave),
        ];
        let decisions = engine(true).assign(&tickets, &agents);
        prop_assert!(decisions.iter().all(|d| d.outcome == DecisionOutcome::Unassigned));
    }

    /// Property: an un-negated CRITICAL keyword always yields CRITICAL
    #[test]
    fn critical_keyword_yields_critical(
        keyword in prop::sample::select(
            KeywordTable::standard().critical.into_iter().map(|k| k.phrase).collect::<Vec<_>>()
        ),
        before in prop::collection::vec(prop::sample::select(NEUTRAL_WORDS.to_vec()), 0..6),
        after in prop::collection::vec(prop::sample::select(NEUTRAL_WORDS.to_vec()), 0..6)
    ) {
        let text = format!("{} {} {}", before.join(" "), keyword, after.join(" "));
        let assessment = PriorityAnalyzer::standard().analyze(&text);
        prop_assert_eq!(assessment.tier, UrgencyTier::Critical);
    }

    /// Property: text without keywords is MEDIUM at the baseline score
    #[test]
    fn keyword_free_text_is_medium_baseline(
        words in prop::collection::vec(prop::sample::select(NEUTRAL_WORDS.to_vec()), 0..12)
    ) {
        let analyzer = PriorityAnalyzer::standard();
        let assessment = analyzer.analyze(&words.join(" "));
        prop_assert_eq!(assessment.tier, UrgencyTier::Medium);
        prop_assert_eq!(assessment.score, analyzer.settings().baseline_score);
    }
}
