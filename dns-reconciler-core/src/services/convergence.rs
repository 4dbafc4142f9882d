//! Convergence planning
//!
//! Pure decision step of the change applier: given what the zone holds and
//! what is desired, decide which provider mutations bring one name/type group
//! to the desired targets.

use std::collections::HashSet;

use dns_reconciler_provider::ProviderRecord;

/// One provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mutation {
    Create {
        content: String,
    },
    Update {
        record_id: String,
        content: String,
        rename: Option<String>,
    },
    Delete {
        record_id: String,
    },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ConvergencePlan {
    pub mutations: Vec<Mutation>,
    /// Targets already held by a record with an acceptable TTL.
    pub unchanged: usize,
}

/// Inputs of [`plan`].
pub(crate) struct PlanInput<'a> {
    /// Desired values; duplicates are ignored.
    pub targets: &'a [String],
    /// Desired TTL, 0 for "whatever the provider has".
    pub ttl: u32,
    /// Records already stored under the desired name and type.
    pub settled: &'a [&'a ProviderRecord],
    /// Records that may be rewritten to carry a missing target.
    pub reusable: &'a [&'a ProviderRecord],
    /// Delete reusable records left without a target.
    pub prune: bool,
    /// Name written onto reused records.
    pub rename: Option<&'a str>,
}

/// Plan the mutations converging one group.
///
/// Each target is handled on its own: a settled record holding it is kept
/// (TTL-only update when a non-zero desired TTL differs), otherwise the next
/// spare reusable record is rewritten in place, otherwise a record is created.
pub(crate) fn plan(input: &PlanInput<'_>) -> ConvergencePlan {
    let mut result = ConvergencePlan::default();
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut missing: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for target in input.targets {
        if !seen.insert(target.as_str()) {
            continue;
        }
        let holder = input
            .settled
            .iter()
            .find(|r| r.content == *target && !consumed.contains(r.id.as_str()));
        match holder {
            Some(record) => {
                consumed.insert(record.id.as_str());
                if input.ttl > 0 && record.ttl != input.ttl {
                    result.mutations.push(Mutation::Update {
                        record_id: record.id.clone(),
                        content: target.clone(),
                        rename: None,
                    });
                } else {
                    result.unchanged += 1;
                }
            }
            None => missing.push(target.as_str()),
        }
    }

    let mut spares = input
        .reusable
        .iter()
        .filter(|r| consumed.insert(r.id.as_str()));

    for target in missing {
        match spares.next() {
            Some(record) => result.mutations.push(Mutation::Update {
                record_id: record.id.clone(),
                content: target.to_string(),
                rename: input.rename.map(str::to_string),
            }),
            None => result.mutations.push(Mutation::Create {
                content: target.to_string(),
            }),
        }
    }

    if input.prune {
        result
            .mutations
            .extend(spares.map(|r| Mutation::Delete {
                record_id: r.id.clone(),
            }));
    }

    result
}
