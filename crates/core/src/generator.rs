//! Builds the large randomized subscription fixture served by the test
//! server, plus the ManagedCluster manifests derived from it. Field names and
//! fixed values match the payloads the mock API returns, so regenerated
//! fixtures stay interchangeable with curated ones.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ports::Result;

/// Page size used when splitting generated subscriptions into fixture files.
pub const PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub kind: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub kind: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Couplet {
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDetail {
    pub updated_timestamp: String,
    pub used: Couplet,
    pub total: Couplet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nodes {
    pub total: i64,
    pub master: i64,
    pub compute: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upgrade {
    pub updated_timestamp: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub health_state: String,
    pub memory: NodeDetail,
    pub cpu: NodeDetail,
    pub sockets: NodeDetail,
    pub compute_nodes_memory: NodeDetail,
    pub compute_nodes_cpu: NodeDetail,
    pub compute_nodes_sockets: NodeDetail,
    pub storage: NodeDetail,
    pub nodes: Nodes,
    pub operating_system: String,
    pub upgrade: Upgrade,
    pub state: String,
    pub state_description: String,
    pub openshift_version: String,
    pub cloud_provider: String,
    pub region: String,
    pub console_url: String,
    pub critical_alerts_firing: i64,
    pub operators_condition_failing: i64,
    pub subscription_cpu_total: i64,
    pub subscription_socket_total: i64,
    pub subscription_obligation_exists: i64,
    pub cluster_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub kind: String,
    pub href: String,
    pub plan: Plan,
    pub cluster_id: String,
    pub external_cluster_id: String,
    pub organization_id: String,
    pub last_telemetry_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub support_level: String,
    pub display_name: String,
    pub creator: Creator,
    pub managed: bool,
    pub status: String,
    pub provenance: String,
    pub last_reconcile_date: String,
    pub console_url: String,
    pub last_released_at: String,
    pub metrics: Vec<Metric>,
    pub cloud_provider_id: String,
    pub region_id: String,
    pub trial_end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionList {
    pub kind: String,
    pub page: i64,
    pub size: i64,
    pub total: i64,
    pub items: Vec<Subscription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedCluster {
    pub api_version: String,
    pub kind: String,
    pub metadata: ClusterMetadata,
    pub spec: ClusterSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterMetadata {
    pub name: String,
    pub labels: ClusterLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterLabels {
    #[serde(rename = "local-cluster")]
    pub local_cluster: String,
    pub cloud: String,
    pub vendor: String,
    #[serde(rename = "clusterID")]
    pub cluster_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    pub hub_accepts_client: bool,
    pub lease_duration_seconds: i64,
}

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz123456789";

const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

fn random_sequence<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

fn unique_ids<R: Rng>(rng: &mut R, count: usize, length: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(count);
    while ids.len() < count {
        let id = random_sequence(rng, length);
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }
    ids
}

// UUID-shaped external cluster ids: 8-8-4-4-4-10 segments
fn unique_external_ids<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(count);
    while ids.len() < count {
        let id = [8usize, 8, 4, 4, 4, 10]
            .map(|length| random_sequence(rng, length))
            .join("-");
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }
    ids
}

fn format_utc(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

fn random_offset_within<R: Rng>(rng: &mut R, window: Duration) -> Duration {
    let nanos = window.num_nanoseconds().unwrap_or(0).max(1);
    Duration::nanoseconds(rng.gen_range(0..nanos))
}

fn fixed_metric() -> Metric {
    let couplet = Couplet {
        value: 0,
        unit: String::new(),
    };
    let node_detail = NodeDetail {
        updated_timestamp: ZERO_TIME.to_string(),
        used: couplet.clone(),
        total: couplet,
    };
    Metric {
        health_state: "healthy".to_string(),
        memory: node_detail.clone(),
        cpu: node_detail.clone(),
        sockets: node_detail.clone(),
        compute_nodes_memory: node_detail.clone(),
        compute_nodes_cpu: node_detail.clone(),
        compute_nodes_sockets: node_detail.clone(),
        storage: node_detail,
        nodes: Nodes {
            total: 6,
            master: 3,
            compute: 3,
        },
        operating_system: String::new(),
        upgrade: Upgrade {
            updated_timestamp: "2021-02-23T21:50:27.431Z".to_string(),
            available: true,
        },
        state: "ready".to_string(),
        state_description: String::new(),
        openshift_version: "4.6.9".to_string(),
        cloud_provider: "aws".to_string(),
        region: "us-east-1".to_string(),
        console_url:
            "https://console-openshift-console.apps.jdgray-kfmxg.dev01.red-chesterfield.com"
                .to_string(),
        critical_alerts_firing: 0,
        operators_condition_failing: 0,
        subscription_cpu_total: 6,
        subscription_socket_total: 3,
        subscription_obligation_exists: 2,
        cluster_type: String::new(),
    }
}

/// Generates `total` randomized subscriptions. Each record gets a `created_at`
/// somewhere in the last ten days, with `updated_at` and
/// `last_telemetry_date` drawn between creation and now.
pub fn generate_subscriptions(total: usize) -> Vec<Subscription> {
    let mut rng = rand::thread_rng();

    let ids = unique_ids(&mut rng, total, 27);
    let cluster_ids = unique_ids(&mut rng, total, 32);
    let external_ids = unique_external_ids(&mut rng, total);

    let plan = Plan {
        id: "OCP".to_string(),
        kind: "Plan".to_string(),
        href: "/api/accounts_mgmt/v1/plans/OCP".to_string(),
    };
    let creator = Creator {
        id: "1Yu9TMhpDebs1S6wjLPIgYLlOn4".to_string(),
        kind: "Account".to_string(),
        href: "/api/accounts_mgmt/v1/accounts/1Yu9TMhpDebs1S6wjLPIgYLlOn4".to_string(),
    };
    let metrics = vec![fixed_metric()];

    let mut subscriptions = Vec::with_capacity(total);
    for i in 0..total {
        let now = Utc::now();
        let floor = now - Duration::days(10);
        let created = floor + random_offset_within(&mut rng, now - floor);
        let updated = created + random_offset_within(&mut rng, now - created);
        let telemetry = created + random_offset_within(&mut rng, now - created);

        subscriptions.push(Subscription {
            id: ids[i].clone(),
            kind: "Subscription".to_string(),
            href: "/api/accounts_mgmt/v1/subscriptions/1YuEObNEl4Z8b79mbbHD7a9hkl6".to_string(),
            plan: plan.clone(),
            cluster_id: cluster_ids[i].clone(),
            external_cluster_id: external_ids[i].clone(),
            organization_id: "1Yu9TWVAfvJu9Cj5hbMT6iYkdk8".to_string(),
            last_telemetry_date: format_utc(telemetry),
            created_at: format_utc(created),
            updated_at: format_utc(updated),
            support_level: "None".to_string(),
            display_name: external_ids[i].clone(),
            creator: creator.clone(),
            managed: false,
            status: "Active".to_string(),
            provenance: "Telemetry".to_string(),
            last_reconcile_date: "2020-03-10T20:43:46.428922Z".to_string(),
            console_url:
                "https://console-openshift-console.apps.jdgray-c6mvq.dev01.red-chesterfield.com"
                    .to_string(),
            last_released_at: ZERO_TIME.to_string(),
            metrics: metrics.clone(),
            cloud_provider_id: "aws".to_string(),
            region_id: "us-east-1".to_string(),
            trial_end_date: ZERO_TIME.to_string(),
        });
    }

    subscriptions
}

/// Splits the subscriptions into `SubscriptionList` pages of `page_size`.
/// Page count is `total / page_size + 1`, so an exact multiple produces a
/// trailing empty page; the mock API pages the same way.
pub fn paginate_subscriptions(
    subscriptions: Vec<Subscription>,
    page_size: usize,
) -> Vec<SubscriptionList> {
    let total = subscriptions.len();
    let pages = total / page_size + 1;

    let mut lists = Vec::with_capacity(pages);
    for page in 0..pages {
        let low = page_size * page;
        let high = (low + page_size).min(total);
        let items = subscriptions[low..high].to_vec();
        lists.push(SubscriptionList {
            kind: "SubscriptionList".to_string(),
            page: (page + 1) as i64,
            size: items.len() as i64,
            total: total as i64,
            items,
        });
    }
    lists
}

/// Fixture filename for a page: the first page is `subscription_response.json`,
/// later pages get a `_<page_num>` suffix.
pub fn page_filename(index: usize) -> String {
    if index == 0 {
        "subscription_response.json".to_string()
    } else {
        format!("subscription_response_{}.json", index + 1)
    }
}

/// Builds ManagedCluster manifests for the first `count` subscriptions in the
/// fixture, carrying each record's external cluster id into the clusterID
/// label.
pub fn generate_managed_clusters(
    list: &SubscriptionList,
    count: usize,
) -> Result<Vec<ManagedCluster>> {
    if count > list.items.len() {
        return Err("managed clusters must be fewer than the number of discovered clusters".into());
    }

    let spec = ClusterSpec {
        hub_accepts_client: true,
        lease_duration_seconds: 60,
    };
    Ok((0..count)
        .map(|i| ManagedCluster {
            api_version: "cluster.open-cluster-management.io/v1".to_string(),
            kind: "ManagedCluster".to_string(),
            metadata: ClusterMetadata {
                name: format!("testmc{}", i),
                labels: ClusterLabels {
                    local_cluster: "false".to_string(),
                    cloud: "auto-detect".to_string(),
                    vendor: "auto-detect".to_string(),
                    cluster_id: list.items[i].external_cluster_id.clone(),
                },
            },
            spec: spec.clone(),
        })
        .collect())
}

/// Renders the manifests as a multi-document YAML stream, with a separator
/// before each document and after the last one.
pub fn render_managed_clusters_yaml(clusters: &[ManagedCluster]) -> Result<String> {
    let mut output = String::from("---\n");
    for cluster in clusters {
        output.push_str(&serde_yaml::to_string(cluster)?);
        output.push_str("---\n");
    }
    Ok(output)
}
