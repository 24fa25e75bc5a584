//! Validator list polling with a single fallback.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn, Instrument};
use vigil_ports::{NodeApi, ValidatorEntry};
use vigil_types::{
    Address, Candidate, CandidateStatus, Clock, PublicKey, Stake, Timestamp, TokenAmount,
    VigilError,
};

use crate::error::PollError;
use crate::metrics::MonitorMetrics;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::tracing_spans::fetch_span;

/// Fetches the full candidate list and turns it into a [`Snapshot`].
///
/// The primary endpoint is asked first. Any failure there (transport, HTTP
/// status, non-zero `code`, unparseable body) moves on to the secondary, which
/// is tried exactly once. There is no retry within a cycle beyond that.
pub struct Poller {
    primary: Arc<dyn NodeApi>,
    secondary: Option<Arc<dyn NodeApi>>,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<MonitorMetrics>>,
}

impl Poller {
    pub fn new(
        primary: Arc<dyn NodeApi>,
        secondary: Option<Arc<dyn NodeApi>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            primary,
            secondary,
            clock,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<MonitorMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch and map the candidate list. Does not touch any store.
    pub async fn poll(&self) -> Result<Snapshot, PollError> {
        let started = Instant::now();
        if let Some(m) = &self.metrics {
            m.polls_total.inc();
        }

        let result = self.fetch_with_fallback().await.and_then(|entries| {
            let taken_at = self.clock.now();
            let candidates = entries
                .iter()
                .map(|entry| candidate_from_entry(entry, taken_at))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Snapshot::new(candidates, taken_at))
        });

        if let Some(m) = &self.metrics {
            m.poll_latency_ms
                .observe(started.elapsed().as_secs_f64() * 1000.0);
            if result.is_err() {
                m.poll_failures_total.inc();
            }
        }
        result
    }

    /// Poll and, on success, replace the live snapshot. On failure the
    /// store is left exactly as it was.
    pub async fn refresh(&self, store: &SnapshotStore) -> Result<u64, PollError> {
        let snapshot = self.poll().await?;
        let (candidates, validators) = (snapshot.len(), snapshot.validator_count());
        let generation = store.replace(snapshot);
        if let Some(m) = &self.metrics {
            m.set_snapshot(generation, candidates, validators);
        }
        debug!(generation, candidates, validators, "snapshot replaced");
        Ok(generation)
    }

    async fn fetch_with_fallback(&self) -> Result<Vec<ValidatorEntry>, PollError> {
        let primary_err = match fetch(self.primary.as_ref(), "primary").await {
            Ok(entries) => return Ok(entries),
            Err(e) => e,
        };
        warn!(endpoint = self.primary.endpoint(), error = %primary_err, "primary node failed");

        let Some(secondary) = &self.secondary else {
            return Err(PollError::Unreachable {
                primary: primary_err,
                secondary: None,
            });
        };

        if let Some(m) = &self.metrics {
            m.poll_fallbacks_total.inc();
        }
        match fetch(secondary.as_ref(), "secondary").await {
            Ok(entries) => Ok(entries),
            Err(secondary_err) => {
                warn!(endpoint = secondary.endpoint(), error = %secondary_err, "secondary node failed");
                Err(PollError::Unreachable {
                    primary: primary_err,
                    secondary: Some(secondary_err),
                })
            }
        }
    }
}

async fn fetch(api: &dyn NodeApi, role: &'static str) -> Result<Vec<ValidatorEntry>, String> {
    async {
        let response = api.validators().await.map_err(|e| e.to_string())?;
        if response.code != 0 {
            return Err(format!("node returned code {}: {}", response.code, response.log));
        }
        debug!(entries = response.result.len(), "validator list received");
        Ok::<_, String>(response.result)
    }
    .instrument(fetch_span(api.endpoint(), role))
    .await
}

/// Map one node entry to a [`Candidate`], computing display amounts.
///
/// Any unparseable amount, or a malformed candidate address, fails the entry.
/// Stake owners and coins are carried verbatim.
pub fn candidate_from_entry(
    entry: &ValidatorEntry,
    refreshed_at: Timestamp,
) -> Result<Candidate, PollError> {
    let c = &entry.candidate;
    let malformed = |e: VigilError| PollError::Malformed(format!("{}: {e}", c.pub_key));

    let total_stake = TokenAmount::from_decimal_str(&c.total_stake).map_err(malformed)?;
    let accumulated_reward =
        TokenAmount::from_decimal_str(&entry.accumulated_reward).map_err(malformed)?;

    let stakes = c
        .stakes
        .iter()
        .map(|s| -> Result<Stake, VigilError> {
            let value = TokenAmount::from_decimal_str(&s.value)?;
            let bip_value = TokenAmount::from_decimal_str(&s.bip_value)?;
            Ok(Stake {
                owner: s.owner.clone(),
                coin: s.coin.clone(),
                value,
                bip_value,
                value_display: value.to_display(),
                bip_value_display: bip_value.to_display(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;

    Ok(Candidate {
        pub_key: PublicKey::new(c.pub_key.clone()),
        candidate_address: Address::parse(&c.candidate_address).map_err(malformed)?,
        total_stake,
        total_stake_display: total_stake.to_display(),
        commission: c.commission,
        created_at_block: c.created_at_block,
        status: CandidateStatus::from_code(c.status),
        stakes,
        accumulated_reward,
        accumulated_reward_display: accumulated_reward.to_display(),
        absent_times: entry.absent_times,
        refreshed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_nullables::{NullClock, NullNodeApi};
    use vigil_ports::{CandidateEntry, PortError, StakeEntry, ValidatorsResponse};

    const ADDR: &str = "Mx31e61a05adbd13c6b625262704bc305bf7725026";

    fn entry(key: &str, status: i64, stake: &str) -> ValidatorEntry {
        ValidatorEntry {
            accumulated_reward: "2500000000000000000".into(),
            absent_times: 4,
            candidate: CandidateEntry {
                candidate_address: ADDR.into(),
                total_stake: stake.into(),
                pub_key: key.into(),
                commission: 10,
                created_at_block: 1204,
                status,
                stakes: vec![StakeEntry {
                    owner: ADDR.into(),
                    coin: "BIP".into(),
                    value: stake.into(),
                    bip_value: stake.into(),
                }],
            },
        }
    }

    fn listing(entries: Vec<ValidatorEntry>) -> ValidatorsResponse {
        ValidatorsResponse {
            code: 0,
            result: entries,
            log: String::new(),
        }
    }

    fn poller(primary: &Arc<NullNodeApi>, secondary: Option<&Arc<NullNodeApi>>) -> Poller {
        Poller::new(
            primary.clone(),
            secondary.map(|s| s.clone() as Arc<dyn NodeApi>),
            Arc::new(NullClock::new(1_000)),
        )
    }

    #[test]
    fn maps_entry_fields() {
        let c = candidate_from_entry(&entry("MpAA", 2, "5000000000000000000"), Timestamp::new(9))
            .unwrap();
        assert_eq!(c.pub_key.as_str(), "MpAA");
        assert_eq!(c.candidate_address.as_str(), ADDR);
        assert_eq!(c.total_stake.raw(), 5_000_000_000_000_000_000);
        assert_eq!(c.total_stake_display, 5.0);
        assert_eq!(c.accumulated_reward_display, 2.5);
        assert_eq!(c.absent_times, 4);
        assert_eq!(c.status, CandidateStatus::Validator);
        assert_eq!(c.stakes.len(), 1);
        assert_eq!(c.stakes[0].coin, "BIP");
        assert_eq!(c.stakes[0].owner, ADDR);
        assert_eq!(c.stakes[0].bip_value_display, 5.0);
        assert_eq!(c.refreshed_at, Timestamp::new(9));
    }

    #[test]
    fn empty_amount_is_zero() {
        let c = candidate_from_entry(&entry("MpAA", 1, ""), Timestamp::new(0)).unwrap();
        assert!(c.total_stake.is_zero());
        assert_eq!(c.total_stake_display, 0.0);
        assert_eq!(c.status, CandidateStatus::Candidate);
    }

    #[test]
    fn malformed_amount_names_the_key() {
        let err = candidate_from_entry(&entry("MpBAD", 2, "12x"), Timestamp::new(0)).unwrap_err();
        assert!(matches!(err, PollError::Malformed(msg) if msg.contains("MpBAD")));
    }

    #[test]
    fn unusual_stake_owner_and_coin_are_kept_verbatim() {
        let mut e = entry("MpAA", 2, "1");
        e.candidate.stakes[0].coin = "LONGCOINNAME-1".into();
        e.candidate.stakes[0].owner = "not-an-address".into();
        let c = candidate_from_entry(&e, Timestamp::new(0)).unwrap();
        assert_eq!(c.stakes[0].coin, "LONGCOINNAME-1");
        assert_eq!(c.stakes[0].owner, "not-an-address");
    }

    #[test]
    fn malformed_stake_amount_is_rejected() {
        let mut e = entry("MpAA", 2, "1");
        e.candidate.stakes[0].bip_value = "1.5".into();
        assert!(matches!(
            candidate_from_entry(&e, Timestamp::new(0)),
            Err(PollError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn unchanged_data_polls_to_equal_snapshots() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        primary.set_validators(listing(vec![entry("MpAA", 2, "1"), entry("MpBB", 1, "7")]));
        let clock = Arc::new(NullClock::new(1_000));
        let poller = Poller::new(primary.clone(), None, clock.clone());

        let first = poller.poll().await.unwrap();
        clock.advance(60);
        let second = poller.poll().await.unwrap();

        assert_eq!(first.taken_at, Some(Timestamp::new(1_000)));
        assert_eq!(second.taken_at, Some(Timestamp::new(1_060)));
        assert_eq!(second.candidates[0].refreshed_at, Timestamp::new(1_060));
        assert_eq!(first, second);
        assert_eq!(first.candidates, second.candidates);
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        let secondary = Arc::new(NullNodeApi::new("http://b"));
        primary.set_validators(listing(vec![entry("MpAA", 2, "1")]));

        let snapshot = poller(&primary, Some(&secondary)).poll().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.taken_at, Some(Timestamp::new(1_000)));
        assert_eq!(secondary.validators_calls(), 0);
    }

    #[tokio::test]
    async fn falls_back_exactly_once() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        let secondary = Arc::new(NullNodeApi::new("http://b"));
        primary.fail_validators(PortError::Unreachable("refused".into()));
        secondary.set_validators(listing(vec![entry("MpAA", 2, "1"), entry("MpBB", 1, "1")]));

        let snapshot = poller(&primary, Some(&secondary)).poll().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(primary.validators_calls(), 1);
        assert_eq!(secondary.validators_calls(), 1);
    }

    #[tokio::test]
    async fn non_zero_code_triggers_fallback() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        let secondary = Arc::new(NullNodeApi::new("http://b"));
        primary.set_validators(ValidatorsResponse {
            code: 500,
            result: Vec::new(),
            log: "syncing".into(),
        });
        secondary.set_validators(listing(vec![entry("MpAA", 2, "1")]));

        assert!(poller(&primary, Some(&secondary)).poll().await.is_ok());
        assert_eq!(secondary.validators_calls(), 1);
    }

    #[tokio::test]
    async fn both_failing_is_unreachable() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        let secondary = Arc::new(NullNodeApi::new("http://b"));
        primary.fail_validators(PortError::Status(502));
        secondary.fail_validators(PortError::InvalidResponse("eof".into()));

        let err = poller(&primary, Some(&secondary)).poll().await.unwrap_err();
        match err {
            PollError::Unreachable { primary, secondary } => {
                assert!(primary.contains("502"));
                assert!(secondary.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(secondary.validators_calls(), 1);
    }

    #[tokio::test]
    async fn without_secondary_fails_after_primary() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        primary.fail_validators(PortError::Unreachable("timeout".into()));
        let err = poller(&primary, None).poll().await.unwrap_err();
        assert!(matches!(err, PollError::Unreachable { secondary: None, .. }));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        primary.set_validators(listing(vec![entry("MpAA", 2, "1")]));
        let poller = poller(&primary, None);
        let store = SnapshotStore::new();
        assert_eq!(poller.refresh(&store).await.unwrap(), 1);

        primary.fail_validators(PortError::Unreachable("down".into()));
        assert!(poller.refresh(&store).await.is_err());
        assert_eq!(store.generation(), 1);
        assert!(store.is_validator("MpAA"));

        primary.set_validators(listing(vec![entry("MpAA", 2, "1"), entry("MpBB", 2, "bad")]));
        assert!(matches!(
            poller.refresh(&store).await,
            Err(PollError::Malformed(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn metrics_track_fallbacks_and_failures() {
        let primary = Arc::new(NullNodeApi::new("http://a"));
        let secondary = Arc::new(NullNodeApi::new("http://b"));
        let metrics = Arc::new(MonitorMetrics::new());
        let poller = poller(&primary, Some(&secondary)).with_metrics(metrics.clone());
        let store = SnapshotStore::new();

        primary.fail_validators(PortError::Status(503));
        secondary.set_validators(listing(vec![entry("MpAA", 2, "1"), entry("MpBB", 1, "1")]));
        poller.refresh(&store).await.unwrap();

        secondary.fail_validators(PortError::Status(503));
        assert!(poller.refresh(&store).await.is_err());

        assert_eq!(metrics.polls_total.get(), 2);
        assert_eq!(metrics.poll_fallbacks_total.get(), 2);
        assert_eq!(metrics.poll_failures_total.get(), 1);
        assert_eq!(metrics.candidates.get(), 2);
        assert_eq!(metrics.validators.get(), 1);
        assert_eq!(metrics.snapshot_generation.get(), 1);
    }
}
