//! Read-only views of the Kubernetes objects inside an edge cluster.
//!
//! These are plain data: each backend message converts once into a
//! `SimpleObject` tree. Enum values this build does not know fail the
//! conversion instead of being guessed.

use {
    async_graphql::{Enum, ID, SimpleObject},
    chrono::DateTime,
    edgecloud_common::{Error, Result},
    edgecloud_service_traits::edge_cluster as proto,
    prost_types::Timestamp,
};

fn decode<P, G>(kind: &str, value: i32) -> Result<G>
where
    P: TryFrom<i32>,
    G: From<P>,
{
    P::try_from(value)
        .map(G::from)
        .map_err(|_| Error::unknown(format!("{kind} is not supported: {value}")))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// RFC 3339 rendering of a protobuf timestamp.
fn rfc3339(value: Option<Timestamp>) -> Option<String> {
    let value = value?;
    let nanos = u32::try_from(value.nanos).ok()?;
    DateTime::from_timestamp(value.seconds, nanos).map(|t| t.to_rfc3339())
}

// ── Enums ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
}

impl From<proto::Protocol> for Protocol {
    fn from(value: proto::Protocol) -> Self {
        match value {
            proto::Protocol::Tcp => Self::Tcp,
            proto::Protocol::Udp => Self::Udp,
            proto::Protocol::Sctp => Self::Sctp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl From<proto::ConditionStatus> for ConditionStatus {
    fn from(value: proto::ConditionStatus) -> Self {
        match value {
            proto::ConditionStatus::True => Self::True,
            proto::ConditionStatus::False => Self::False,
            proto::ConditionStatus::Unknown => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum NodeConditionType {
    Ready,
    MemoryPressure,
    DiskPressure,
    PidPressure,
    NetworkUnavailable,
}

impl From<proto::NodeConditionType> for NodeConditionType {
    fn from(value: proto::NodeConditionType) -> Self {
        match value {
            proto::NodeConditionType::Ready => Self::Ready,
            proto::NodeConditionType::MemoryPressure => Self::MemoryPressure,
            proto::NodeConditionType::DiskPressure => Self::DiskPressure,
            proto::NodeConditionType::PidPressure => Self::PidPressure,
            proto::NodeConditionType::NetworkUnavailable => Self::NetworkUnavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum NodeAddressType {
    Hostname,
    #[graphql(name = "EXTERNAL_IP")]
    ExternalIp,
    #[graphql(name = "INTERNAL_IP")]
    InternalIp,
    #[graphql(name = "EXTERNAL_DNS")]
    ExternalDns,
    #[graphql(name = "INTERNAL_DNS")]
    InternalDns,
}

impl From<proto::NodeAddressType> for NodeAddressType {
    fn from(value: proto::NodeAddressType) -> Self {
        match value {
            proto::NodeAddressType::Hostname => Self::Hostname,
            proto::NodeAddressType::ExternalIp => Self::ExternalIp,
            proto::NodeAddressType::InternalIp => Self::InternalIp,
            proto::NodeAddressType::ExternalDns => Self::ExternalDns,
            proto::NodeAddressType::InternalDns => Self::InternalDns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum PodConditionType {
    PodScheduled,
    ContainersReady,
    Initialized,
    Ready,
}

impl From<proto::PodConditionType> for PodConditionType {
    fn from(value: proto::PodConditionType) -> Self {
        match value {
            proto::PodConditionType::PodScheduled => Self::PodScheduled,
            proto::PodConditionType::ContainersReady => Self::ContainersReady,
            proto::PodConditionType::Initialized => Self::Initialized,
            proto::PodConditionType::Ready => Self::Ready,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ServiceType {
    #[graphql(name = "CLUSTER_IP")]
    ClusterIp,
    NodePort,
    LoadBalancer,
    ExternalName,
}

impl From<proto::ServiceType> for ServiceType {
    fn from(value: proto::ServiceType) -> Self {
        match value {
            proto::ServiceType::ClusterIp => Self::ClusterIp,
            proto::ServiceType::NodePort => Self::NodePort,
            proto::ServiceType::LoadBalancer => Self::LoadBalancer,
            proto::ServiceType::ExternalName => Self::ExternalName,
        }
    }
}

// ── Shared ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ObjectMeta {
    pub id: ID,
    pub name: String,
    pub namespace: Option<String>,
}

impl From<proto::ObjectMeta> for ObjectMeta {
    fn from(value: proto::ObjectMeta) -> Self {
        Self {
            id: ID(value.id),
            name: value.name,
            namespace: non_empty(value.namespace),
        }
    }
}

fn metadata(kind: &str, value: Option<proto::ObjectMeta>) -> Result<ObjectMeta> {
    value
        .map(ObjectMeta::from)
        .ok_or_else(|| Error::unknown(format!("{kind} has no metadata")))
}

// ── Provision detail ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Ingress {
    pub ip: String,
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Port {
    pub port: i32,
    pub protocol: Protocol,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "EdgeClusterProvisionDetail")]
pub struct ProvisionDetail {
    pub ingress: Vec<Ingress>,
    pub ports: Vec<Port>,
    pub kubeconfig_content: Option<String>,
}

impl TryFrom<proto::ProvisionDetail> for ProvisionDetail {
    type Error = Error;

    fn try_from(value: proto::ProvisionDetail) -> Result<Self> {
        Ok(Self {
            ingress: value
                .ingress
                .into_iter()
                .map(|ingress| Ingress {
                    ip: ingress.ip,
                    hostname: ingress.hostname,
                })
                .collect(),
            ports: value
                .ports
                .into_iter()
                .map(|port| {
                    Ok(Port {
                        port: port.port,
                        protocol: decode::<proto::Protocol, _>("protocol", port.protocol)?,
                    })
                })
                .collect::<Result<_>>()?,
            kubeconfig_content: non_empty(value.kubeconfig_content),
        })
    }
}

// ── Nodes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct NodeCondition {
    #[graphql(name = "type")]
    pub condition_type: NodeConditionType,
    pub status: ConditionStatus,
    pub last_heartbeat_time: Option<String>,
    pub last_transition_time: Option<String>,
    pub reason: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct NodeAddress {
    pub node_address_type: NodeAddressType,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct NodeSystemInfo {
    #[graphql(name = "machineID")]
    pub machine_id: String,
    #[graphql(name = "systemUUID")]
    pub system_uuid: String,
    #[graphql(name = "bootID")]
    pub boot_id: String,
    pub kernel_version: String,
    pub os_image: String,
    pub container_runtime_version: String,
    pub kubelet_version: String,
    pub kube_proxy_version: String,
    pub operating_system: String,
    pub architecture: String,
}

impl From<proto::NodeSystemInfo> for NodeSystemInfo {
    fn from(value: proto::NodeSystemInfo) -> Self {
        Self {
            machine_id: value.machine_id,
            system_uuid: value.system_uuid,
            boot_id: value.boot_id,
            kernel_version: value.kernel_version,
            os_image: value.os_image,
            container_runtime_version: value.container_runtime_version,
            kubelet_version: value.kubelet_version,
            kube_proxy_version: value.kube_proxy_version,
            operating_system: value.operating_system,
            architecture: value.architecture,
        }
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct NodeStatus {
    pub conditions: Vec<NodeCondition>,
    pub addresses: Vec<NodeAddress>,
    pub node_info: Option<NodeSystemInfo>,
}

impl TryFrom<proto::NodeStatus> for NodeStatus {
    type Error = Error;

    fn try_from(value: proto::NodeStatus) -> Result<Self> {
        let conditions = value
            .conditions
            .into_iter()
            .map(|condition| {
                Ok(NodeCondition {
                    condition_type: decode::<proto::NodeConditionType, _>(
                        "node condition type",
                        condition.r#type,
                    )?,
                    status: decode::<proto::ConditionStatus, _>(
                        "condition status",
                        condition.status,
                    )?,
                    last_heartbeat_time: rfc3339(condition.last_heartbeat_time),
                    last_transition_time: rfc3339(condition.last_transition_time),
                    reason: condition.reason,
                    message: condition.message,
                })
            })
            .collect::<Result<_>>()?;
        let addresses = value
            .addresses
            .into_iter()
            .map(|address| {
                Ok(NodeAddress {
                    node_address_type: decode::<proto::NodeAddressType, _>(
                        "node address type",
                        address.node_address_type,
                    )?,
                    address: address.address,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            conditions,
            addresses,
            node_info: value.node_info.map(NodeSystemInfo::from),
        })
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct EdgeClusterNode {
    pub metadata: ObjectMeta,
    pub status: NodeStatus,
}

impl TryFrom<proto::EdgeClusterNode> for EdgeClusterNode {
    type Error = Error;

    fn try_from(value: proto::EdgeClusterNode) -> Result<Self> {
        Ok(Self {
            metadata: metadata("node", value.metadata)?,
            status: NodeStatus::try_from(value.status.unwrap_or_default())?,
        })
    }
}

// ── Pods ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct PodCondition {
    #[graphql(name = "type")]
    pub condition_type: PodConditionType,
    pub status: ConditionStatus,
    pub last_probe_time: Option<String>,
    pub last_transition_time: Option<String>,
    pub reason: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct PodStatus {
    #[graphql(name = "hostIP")]
    pub host_ip: String,
    #[graphql(name = "podIP")]
    pub pod_ip: String,
    pub conditions: Vec<PodCondition>,
}

impl TryFrom<proto::PodStatus> for PodStatus {
    type Error = Error;

    fn try_from(value: proto::PodStatus) -> Result<Self> {
        let conditions = value
            .conditions
            .into_iter()
            .map(|condition| {
                Ok(PodCondition {
                    condition_type: decode::<proto::PodConditionType, _>(
                        "pod condition type",
                        condition.r#type,
                    )?,
                    status: decode::<proto::ConditionStatus, _>(
                        "condition status",
                        condition.status,
                    )?,
                    last_probe_time: rfc3339(condition.last_probe_time),
                    last_transition_time: rfc3339(condition.last_transition_time),
                    reason: condition.reason,
                    message: condition.message,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            host_ip: value.host_ip,
            pod_ip: value.pod_ip,
            conditions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct PodSpec {
    pub node_name: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct EdgeClusterPod {
    pub metadata: ObjectMeta,
    pub status: PodStatus,
    pub spec: PodSpec,
}

impl TryFrom<proto::EdgeClusterPod> for EdgeClusterPod {
    type Error = Error;

    fn try_from(value: proto::EdgeClusterPod) -> Result<Self> {
        Ok(Self {
            metadata: metadata("pod", value.metadata)?,
            status: PodStatus::try_from(value.status.unwrap_or_default())?,
            spec: PodSpec {
                node_name: value.spec.unwrap_or_default().node_name,
            },
        })
    }
}

// ── Services ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ServicePort {
    pub name: String,
    pub protocol: Protocol,
    pub port: i32,
    pub target_port: String,
    pub node_port: i32,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ServiceSpec {
    pub ports: Vec<ServicePort>,
    #[graphql(name = "clusterIPs")]
    pub cluster_ips: Vec<String>,
    #[graphql(name = "type")]
    pub service_type: ServiceType,
    #[graphql(name = "externalIPs")]
    pub external_ips: Vec<String>,
    pub external_name: Option<String>,
}

impl TryFrom<proto::ServiceSpec> for ServiceSpec {
    type Error = Error;

    fn try_from(value: proto::ServiceSpec) -> Result<Self> {
        let ports = value
            .ports
            .into_iter()
            .map(|port| {
                Ok(ServicePort {
                    name: port.name,
                    protocol: decode::<proto::Protocol, _>("protocol", port.protocol)?,
                    port: port.port,
                    target_port: port.target_port,
                    node_port: port.node_port,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            ports,
            cluster_ips: value.cluster_ips,
            service_type: decode::<proto::ServiceType, _>("service type", value.r#type)?,
            external_ips: value.external_ips,
            external_name: non_empty(value.external_name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct PortStatus {
    pub port: i32,
    pub protocol: Protocol,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct LoadBalancerIngress {
    pub ip: String,
    pub hostname: String,
    pub port_status: Vec<PortStatus>,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct LoadBalancerStatus {
    pub ingress: Vec<LoadBalancerIngress>,
}

impl TryFrom<proto::LoadBalancerStatus> for LoadBalancerStatus {
    type Error = Error;

    fn try_from(value: proto::LoadBalancerStatus) -> Result<Self> {
        let ingress = value
            .ingress
            .into_iter()
            .map(|ingress| {
                let port_status = ingress
                    .port_status
                    .into_iter()
                    .map(|status| {
                        Ok(PortStatus {
                            port: status.port,
                            protocol: decode::<proto::Protocol, _>("protocol", status.protocol)?,
                            error: non_empty(status.error),
                        })
                    })
                    .collect::<Result<_>>()?;
                Ok(LoadBalancerIngress {
                    ip: ingress.ip,
                    hostname: ingress.hostname,
                    port_status,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { ingress })
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ServiceCondition {
    #[graphql(name = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    pub last_transition_time: Option<String>,
    pub reason: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ServiceStatus {
    pub load_balancer: Option<LoadBalancerStatus>,
    pub conditions: Vec<ServiceCondition>,
}

impl TryFrom<proto::ServiceStatus> for ServiceStatus {
    type Error = Error;

    fn try_from(value: proto::ServiceStatus) -> Result<Self> {
        let conditions = value
            .conditions
            .into_iter()
            .map(|condition| {
                Ok(ServiceCondition {
                    condition_type: condition.r#type,
                    status: decode::<proto::ConditionStatus, _>(
                        "condition status",
                        condition.status,
                    )?,
                    last_transition_time: rfc3339(condition.last_transition_time),
                    reason: condition.reason,
                    message: condition.message,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            load_balancer: value
                .load_balancer
                .map(LoadBalancerStatus::try_from)
                .transpose()?,
            conditions,
        })
    }
}

/// A Kubernetes service running inside an edge cluster.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "EdgeClusterService")]
pub struct ClusterService {
    pub metadata: ObjectMeta,
    pub status: ServiceStatus,
    pub spec: ServiceSpec,
}

impl TryFrom<proto::EdgeClusterServiceObject> for ClusterService {
    type Error = Error;

    fn try_from(value: proto::EdgeClusterServiceObject) -> Result<Self> {
        Ok(Self {
            metadata: metadata("service", value.metadata)?,
            status: ServiceStatus::try_from(value.status.unwrap_or_default())?,
            spec: ServiceSpec::try_from(value.spec.unwrap_or_default())?,
        })
    }
}
