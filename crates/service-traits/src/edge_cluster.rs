//! Edge-cluster backend contract (`edgecluster.Service`).
//!
//! Besides CRUD and search, the edge-cluster service exposes read-only views
//! of the Kubernetes objects running inside a provisioned cluster (nodes,
//! pods, services). Those messages mirror the upstream Kubernetes shapes
//! closely, trimmed to what the gateway exposes.

use async_trait::async_trait;

use crate::{
    ServiceResult,
    common::{Error, Pagination, SortingOptionPair},
};

// ── Enumerations ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClusterType {
    K3s = 0,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Protocol {
    Tcp = 0,
    Udp = 1,
    Sctp = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ConditionStatus {
    True = 0,
    False = 1,
    Unknown = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum NodeConditionType {
    Ready = 0,
    MemoryPressure = 1,
    DiskPressure = 2,
    PidPressure = 3,
    NetworkUnavailable = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum NodeAddressType {
    Hostname = 0,
    ExternalIp = 1,
    InternalIp = 2,
    ExternalDns = 3,
    InternalDns = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PodConditionType {
    PodScheduled = 0,
    ContainersReady = 1,
    Initialized = 2,
    Ready = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ServiceType {
    ClusterIp = 0,
    NodePort = 1,
    LoadBalancer = 2,
    ExternalName = 3,
}

// ── Edge cluster ────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeCluster {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub cluster_secret: String,
    #[prost(enumeration = "ClusterType", tag = "4")]
    pub cluster_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ingress {
    #[prost(string, tag = "1")]
    pub ip: String,
    #[prost(string, tag = "2")]
    pub hostname: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Port {
    #[prost(int32, tag = "1")]
    pub port: i32,
    #[prost(enumeration = "Protocol", tag = "2")]
    pub protocol: i32,
}

/// Connection details of a provisioned cluster's master node.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProvisionDetail {
    #[prost(message, repeated, tag = "1")]
    pub ingress: Vec<Ingress>,
    #[prost(message, repeated, tag = "2")]
    pub ports: Vec<Port>,
    #[prost(string, tag = "3")]
    pub kubeconfig_content: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeClusterWithCursor {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
    #[prost(message, optional, tag = "2")]
    pub edge_cluster: Option<EdgeCluster>,
    #[prost(string, tag = "3")]
    pub cursor: String,
    #[prost(message, optional, tag = "4")]
    pub provision_detail: Option<ProvisionDetail>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateEdgeClusterRequest {
    #[prost(message, optional, tag = "1")]
    pub edge_cluster: Option<EdgeCluster>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateEdgeClusterResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(string, tag = "3")]
    pub edge_cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub edge_cluster: Option<EdgeCluster>,
    #[prost(string, tag = "5")]
    pub cursor: String,
    #[prost(message, optional, tag = "6")]
    pub provision_detail: Option<ProvisionDetail>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadEdgeClusterRequest {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadEdgeClusterResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub edge_cluster: Option<EdgeCluster>,
    #[prost(message, optional, tag = "4")]
    pub provision_detail: Option<ProvisionDetail>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateEdgeClusterRequest {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
    #[prost(message, optional, tag = "2")]
    pub edge_cluster: Option<EdgeCluster>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateEdgeClusterResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub edge_cluster: Option<EdgeCluster>,
    #[prost(string, tag = "4")]
    pub cursor: String,
    #[prost(message, optional, tag = "5")]
    pub provision_detail: Option<ProvisionDetail>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteEdgeClusterRequest {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteEdgeClusterResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClustersRequest {
    #[prost(message, optional, tag = "1")]
    pub pagination: Option<Pagination>,
    #[prost(message, repeated, tag = "2")]
    pub sorting_options: Vec<SortingOptionPair>,
    #[prost(string, repeated, tag = "3")]
    pub edge_cluster_ids: Vec<String>,
    #[prost(string, repeated, tag = "4")]
    pub project_ids: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClustersResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(bool, tag = "3")]
    pub has_previous_page: bool,
    #[prost(bool, tag = "4")]
    pub has_next_page: bool,
    #[prost(int64, tag = "5")]
    pub total_count: i64,
    #[prost(message, repeated, tag = "6")]
    pub edge_clusters: Vec<EdgeClusterWithCursor>,
}

// ── Cluster objects ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ObjectMeta {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub namespace: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeCondition {
    #[prost(enumeration = "NodeConditionType", tag = "1")]
    pub r#type: i32,
    #[prost(enumeration = "ConditionStatus", tag = "2")]
    pub status: i32,
    #[prost(message, optional, tag = "3")]
    pub last_heartbeat_time: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub last_transition_time: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "5")]
    pub reason: String,
    #[prost(string, tag = "6")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeAddress {
    #[prost(enumeration = "NodeAddressType", tag = "1")]
    pub node_address_type: i32,
    #[prost(string, tag = "2")]
    pub address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeSystemInfo {
    #[prost(string, tag = "1")]
    pub machine_id: String,
    #[prost(string, tag = "2")]
    pub system_uuid: String,
    #[prost(string, tag = "3")]
    pub boot_id: String,
    #[prost(string, tag = "4")]
    pub kernel_version: String,
    #[prost(string, tag = "5")]
    pub os_image: String,
    #[prost(string, tag = "6")]
    pub container_runtime_version: String,
    #[prost(string, tag = "7")]
    pub kubelet_version: String,
    #[prost(string, tag = "8")]
    pub kube_proxy_version: String,
    #[prost(string, tag = "9")]
    pub operating_system: String,
    #[prost(string, tag = "10")]
    pub architecture: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeStatus {
    #[prost(message, repeated, tag = "1")]
    pub conditions: Vec<NodeCondition>,
    #[prost(message, repeated, tag = "2")]
    pub addresses: Vec<NodeAddress>,
    #[prost(message, optional, tag = "3")]
    pub node_info: Option<NodeSystemInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeClusterNode {
    #[prost(message, optional, tag = "1")]
    pub metadata: Option<ObjectMeta>,
    #[prost(message, optional, tag = "2")]
    pub status: Option<NodeStatus>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PodCondition {
    #[prost(enumeration = "PodConditionType", tag = "1")]
    pub r#type: i32,
    #[prost(enumeration = "ConditionStatus", tag = "2")]
    pub status: i32,
    #[prost(message, optional, tag = "3")]
    pub last_probe_time: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub last_transition_time: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "5")]
    pub reason: String,
    #[prost(string, tag = "6")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PodStatus {
    #[prost(string, tag = "1")]
    pub host_ip: String,
    #[prost(string, tag = "2")]
    pub pod_ip: String,
    #[prost(message, repeated, tag = "3")]
    pub conditions: Vec<PodCondition>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PodSpec {
    #[prost(string, tag = "1")]
    pub node_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeClusterPod {
    #[prost(message, optional, tag = "1")]
    pub metadata: Option<ObjectMeta>,
    #[prost(message, optional, tag = "2")]
    pub status: Option<PodStatus>,
    #[prost(message, optional, tag = "3")]
    pub spec: Option<PodSpec>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServicePort {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(enumeration = "Protocol", tag = "2")]
    pub protocol: i32,
    #[prost(int32, tag = "3")]
    pub port: i32,
    #[prost(string, tag = "4")]
    pub target_port: String,
    #[prost(int32, tag = "5")]
    pub node_port: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceSpec {
    #[prost(message, repeated, tag = "1")]
    pub ports: Vec<ServicePort>,
    #[prost(string, repeated, tag = "2")]
    pub cluster_ips: Vec<String>,
    #[prost(enumeration = "ServiceType", tag = "3")]
    pub r#type: i32,
    #[prost(string, repeated, tag = "4")]
    pub external_ips: Vec<String>,
    #[prost(string, tag = "5")]
    pub external_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PortStatus {
    #[prost(int32, tag = "1")]
    pub port: i32,
    #[prost(enumeration = "Protocol", tag = "2")]
    pub protocol: i32,
    #[prost(string, tag = "3")]
    pub error: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoadBalancerIngress {
    #[prost(string, tag = "1")]
    pub ip: String,
    #[prost(string, tag = "2")]
    pub hostname: String,
    #[prost(message, repeated, tag = "3")]
    pub port_status: Vec<PortStatus>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoadBalancerStatus {
    #[prost(message, repeated, tag = "1")]
    pub ingress: Vec<LoadBalancerIngress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceCondition {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(enumeration = "ConditionStatus", tag = "2")]
    pub status: i32,
    #[prost(message, optional, tag = "3")]
    pub last_transition_time: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub reason: String,
    #[prost(string, tag = "5")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceStatus {
    #[prost(message, optional, tag = "1")]
    pub load_balancer: Option<LoadBalancerStatus>,
    #[prost(message, repeated, tag = "2")]
    pub conditions: Vec<ServiceCondition>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeClusterServiceObject {
    #[prost(message, optional, tag = "1")]
    pub metadata: Option<ObjectMeta>,
    #[prost(message, optional, tag = "2")]
    pub status: Option<ServiceStatus>,
    #[prost(message, optional, tag = "3")]
    pub spec: Option<ServiceSpec>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClusterNodesRequest {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClusterNodesResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, repeated, tag = "3")]
    pub nodes: Vec<EdgeClusterNode>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClusterPodsRequest {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
    #[prost(string, tag = "2")]
    pub namespace: String,
    #[prost(string, tag = "3")]
    pub node_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClusterPodsResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, repeated, tag = "3")]
    pub pods: Vec<EdgeClusterPod>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClusterServicesRequest {
    #[prost(string, tag = "1")]
    pub edge_cluster_id: String,
    #[prost(string, tag = "2")]
    pub namespace: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEdgeClusterServicesResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, repeated, tag = "3")]
    pub services: Vec<EdgeClusterServiceObject>,
}

crate::impl_business_outcome!(
    CreateEdgeClusterResponse,
    ReadEdgeClusterResponse,
    UpdateEdgeClusterResponse,
    DeleteEdgeClusterResponse,
    ListEdgeClustersResponse,
    ListEdgeClusterNodesResponse,
    ListEdgeClusterPodsResponse,
    ListEdgeClusterServicesResponse,
);

/// Typed client for `edgecluster.Service`.
#[async_trait]
pub trait EdgeClusterService: Send + Sync {
    async fn create_edge_cluster(
        &self,
        request: CreateEdgeClusterRequest,
    ) -> ServiceResult<CreateEdgeClusterResponse>;
    async fn read_edge_cluster(
        &self,
        request: ReadEdgeClusterRequest,
    ) -> ServiceResult<ReadEdgeClusterResponse>;
    async fn update_edge_cluster(
        &self,
        request: UpdateEdgeClusterRequest,
    ) -> ServiceResult<UpdateEdgeClusterResponse>;
    async fn delete_edge_cluster(
        &self,
        request: DeleteEdgeClusterRequest,
    ) -> ServiceResult<DeleteEdgeClusterResponse>;
    async fn list_edge_clusters(
        &self,
        request: ListEdgeClustersRequest,
    ) -> ServiceResult<ListEdgeClustersResponse>;
    async fn list_edge_cluster_nodes(
        &self,
        request: ListEdgeClusterNodesRequest,
    ) -> ServiceResult<ListEdgeClusterNodesResponse>;
    async fn list_edge_cluster_pods(
        &self,
        request: ListEdgeClusterPodsRequest,
    ) -> ServiceResult<ListEdgeClusterPodsResponse>;
    async fn list_edge_cluster_services(
        &self,
        request: ListEdgeClusterServicesRequest,
    ) -> ServiceResult<ListEdgeClusterServicesResponse>;
}
