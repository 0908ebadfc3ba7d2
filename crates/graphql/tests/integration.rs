//! Integration tests for the edgecloud-graphql crate.
//!
//! Every test drives the full schema through `Schema::execute` against a
//! recording stub backend, so call counts and channel closes are observable.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use {
    async_graphql::{Request, Response},
    async_trait::async_trait,
    edgecloud_graphql::{EdgeCloudSchema, Registry, RequestContext, ResolverRegistry, build_schema},
    edgecloud_service_traits::{
        Backends, Client, Connection, EdgeClusterClientFactory, ProjectClientFactory,
        ServiceError, ServiceResult, TenantClientFactory,
        common::Error as Sentinel,
        edge_cluster::{self, EdgeClusterService},
        project::{self, ProjectService},
        tenant::{self, TenantService},
    },
    prost::Message,
    serde_json::{Value, json},
};

// ── Mock dispatch ───────────────────────────────────────────────────────────

/// Records every backend call and replays preset responses.
///
/// Requests and responses are kept prost-encoded so one map serves every
/// message type.
struct MockDispatch {
    responses: Mutex<HashMap<&'static str, Vec<u8>>>,
    calls: Mutex<Vec<(&'static str, Vec<u8>)>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl MockDispatch {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            opened: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
        })
    }

    fn set_response(&self, method: &'static str, response: impl Message) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(method, response.encode_to_vec());
    }

    fn call<Req: Message, Resp: Message + Default>(
        &self,
        method: &'static str,
        request: Req,
    ) -> ServiceResult<Resp> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((method, request.encode_to_vec()));
        let responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        match responses.get(method) {
            Some(bytes) => Resp::decode(bytes.as_slice()).map_err(|e| ServiceError::message(e.to_string())),
            None => Err(ServiceError::message(format!("no mock response for {method}"))),
        }
    }

    fn methods(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(method, _)| *method)
            .collect()
    }

    fn count(&self, method: &str) -> usize {
        self.methods().into_iter().filter(|m| *m == method).count()
    }

    /// The last request recorded for `method`.
    fn request<R: Message + Default>(&self, method: &str) -> R {
        let calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        let (_, bytes) = calls
            .iter()
            .rev()
            .find(|(m, _)| *m == method)
            .expect("method was never called");
        R::decode(bytes.as_slice()).unwrap()
    }

    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

// ── Mock backend ────────────────────────────────────────────────────────────

struct MockConnection(Arc<MockDispatch>);

impl Connection for MockConnection {
    fn close(&self) {
        self.0.closed.fetch_add(1, Ordering::SeqCst);
    }
}

struct MockBackend(Arc<MockDispatch>);

#[async_trait]
impl TenantService for MockBackend {
    async fn create_tenant(
        &self,
        request: tenant::CreateTenantRequest,
    ) -> ServiceResult<tenant::CreateTenantResponse> {
        self.0.call("CreateTenant", request)
    }

    async fn read_tenant(
        &self,
        request: tenant::ReadTenantRequest,
    ) -> ServiceResult<tenant::ReadTenantResponse> {
        self.0.call("ReadTenant", request)
    }

    async fn update_tenant(
        &self,
        request: tenant::UpdateTenantRequest,
    ) -> ServiceResult<tenant::UpdateTenantResponse> {
        self.0.call("UpdateTenant", request)
    }

    async fn delete_tenant(
        &self,
        request: tenant::DeleteTenantRequest,
    ) -> ServiceResult<tenant::DeleteTenantResponse> {
        self.0.call("DeleteTenant", request)
    }

    async fn list_tenants(
        &self,
        request: tenant::ListTenantsRequest,
    ) -> ServiceResult<tenant::ListTenantsResponse> {
        self.0.call("ListTenants", request)
    }
}

#[async_trait]
impl ProjectService for MockBackend {
    async fn create_project(
        &self,
        request: project::CreateProjectRequest,
    ) -> ServiceResult<project::CreateProjectResponse> {
        self.0.call("CreateProject", request)
    }

    async fn read_project(
        &self,
        request: project::ReadProjectRequest,
    ) -> ServiceResult<project::ReadProjectResponse> {
        self.0.call("ReadProject", request)
    }

    async fn update_project(
        &self,
        request: project::UpdateProjectRequest,
    ) -> ServiceResult<project::UpdateProjectResponse> {
        self.0.call("UpdateProject", request)
    }

    async fn delete_project(
        &self,
        request: project::DeleteProjectRequest,
    ) -> ServiceResult<project::DeleteProjectResponse> {
        self.0.call("DeleteProject", request)
    }

    async fn list_projects(
        &self,
        request: project::ListProjectsRequest,
    ) -> ServiceResult<project::ListProjectsResponse> {
        self.0.call("ListProjects", request)
    }
}

#[async_trait]
impl EdgeClusterService for MockBackend {
    async fn create_edge_cluster(
        &self,
        request: edge_cluster::CreateEdgeClusterRequest,
    ) -> ServiceResult<edge_cluster::CreateEdgeClusterResponse> {
        self.0.call("CreateEdgeCluster", request)
    }

    async fn read_edge_cluster(
        &self,
        request: edge_cluster::ReadEdgeClusterRequest,
    ) -> ServiceResult<edge_cluster::ReadEdgeClusterResponse> {
        self.0.call("ReadEdgeCluster", request)
    }

    async fn update_edge_cluster(
        &self,
        request: edge_cluster::UpdateEdgeClusterRequest,
    ) -> ServiceResult<edge_cluster::UpdateEdgeClusterResponse> {
        self.0.call("UpdateEdgeCluster", request)
    }

    async fn delete_edge_cluster(
        &self,
        request: edge_cluster::DeleteEdgeClusterRequest,
    ) -> ServiceResult<edge_cluster::DeleteEdgeClusterResponse> {
        self.0.call("DeleteEdgeCluster", request)
    }

    async fn list_edge_clusters(
        &self,
        request: edge_cluster::ListEdgeClustersRequest,
    ) -> ServiceResult<edge_cluster::ListEdgeClustersResponse> {
        self.0.call("ListEdgeClusters", request)
    }

    async fn list_edge_cluster_nodes(
        &self,
        request: edge_cluster::ListEdgeClusterNodesRequest,
    ) -> ServiceResult<edge_cluster::ListEdgeClusterNodesResponse> {
        self.0.call("ListEdgeClusterNodes", request)
    }

    async fn list_edge_cluster_pods(
        &self,
        request: edge_cluster::ListEdgeClusterPodsRequest,
    ) -> ServiceResult<edge_cluster::ListEdgeClusterPodsResponse> {
        self.0.call("ListEdgeClusterPods", request)
    }

    async fn list_edge_cluster_services(
        &self,
        request: edge_cluster::ListEdgeClusterServicesRequest,
    ) -> ServiceResult<edge_cluster::ListEdgeClusterServicesResponse> {
        self.0.call("ListEdgeClusterServices", request)
    }
}

struct MockFactory(Arc<MockDispatch>);

impl MockFactory {
    fn open(&self) -> (Box<MockBackend>, Box<dyn Connection>) {
        self.0.opened.fetch_add(1, Ordering::SeqCst);
        (
            Box::new(MockBackend(Arc::clone(&self.0))),
            Box::new(MockConnection(Arc::clone(&self.0))),
        )
    }
}

#[async_trait]
impl TenantClientFactory for MockFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn TenantService>> {
        let (service, connection) = self.open();
        let service: Box<dyn TenantService> = service;
        Ok(Client::new(service, connection))
    }
}

#[async_trait]
impl ProjectClientFactory for MockFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn ProjectService>> {
        let (service, connection) = self.open();
        let service: Box<dyn ProjectService> = service;
        Ok(Client::new(service, connection))
    }
}

#[async_trait]
impl EdgeClusterClientFactory for MockFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn EdgeClusterService>> {
        let (service, connection) = self.open();
        let service: Box<dyn EdgeClusterService> = service;
        Ok(Client::new(service, connection))
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn setup() -> (EdgeCloudSchema, Arc<MockDispatch>) {
    let dispatch = MockDispatch::new();
    let factory = Arc::new(MockFactory(Arc::clone(&dispatch)));
    let backends = Backends::default()
        .with_tenant(factory.clone())
        .with_project(factory.clone())
        .with_edge_cluster(factory);
    let registry: Arc<dyn ResolverRegistry> = Registry::new(backends);
    (build_schema(registry, "default-user", None), dispatch)
}

async fn execute(schema: &EdgeCloudSchema, query: &str) -> Response {
    schema
        .execute(Request::new(query).data(RequestContext::new("req-1", "user-1")))
        .await
}

fn data(response: Response) -> Value {
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

fn error_code(response: &Response) -> Option<String> {
    response.errors.first().and_then(|err| {
        err.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .map(|code| code.to_string().trim_matches('"').to_string())
    })
}

fn tenant_item(id: &str, name: &str, cursor: &str) -> tenant::TenantWithCursor {
    tenant::TenantWithCursor {
        tenant_id: id.into(),
        tenant: Some(tenant::Tenant { name: name.into() }),
        cursor: cursor.into(),
    }
}

fn edge_cluster_detail(project_id: &str, name: &str) -> edge_cluster::EdgeCluster {
    edge_cluster::EdgeCluster {
        project_id: project_id.into(),
        name: name.into(),
        cluster_secret: "s3cret".into(),
        cluster_type: edge_cluster::ClusterType::K3s as i32,
    }
}

// ── Query root ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_id_comes_from_request_context() {
    let (schema, dispatch) = setup();
    let value = data(execute(&schema, "{ user { id } }").await);
    assert_eq!(value, json!({ "user": { "id": "user-1" } }));
    assert!(dispatch.methods().is_empty());
}

#[tokio::test]
async fn user_id_falls_back_to_default_without_context() {
    let (schema, _) = setup();
    let value = data(schema.execute("{ user { id } }").await);
    assert_eq!(value["user"]["id"], "default-user");
}

// ── Entity resolvers ────────────────────────────────────────────────────────

#[tokio::test]
async fn entity_without_detail_reads_exactly_once() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ReadTenant", tenant::ReadTenantResponse {
        tenant: Some(tenant::Tenant {
            name: "acme".into(),
        }),
        ..Default::default()
    });

    let value = data(execute(&schema, r#"{ user { tenant(tenantID: "t1") { id name } } }"#).await);

    assert_eq!(value["user"]["tenant"], json!({ "id": "t1", "name": "acme" }));
    assert_eq!(dispatch.methods(), vec!["ReadTenant"]);
    let request: tenant::ReadTenantRequest = dispatch.request("ReadTenant");
    assert_eq!(request.tenant_id, "t1");
    assert_eq!(dispatch.opened(), 1);
    assert_eq!(dispatch.closed(), 1);
}

#[tokio::test]
async fn read_business_error_fails_field_and_closes_channel() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ReadProject", project::ReadProjectResponse {
        error: Sentinel::NotFound as i32,
        error_message: "project p9 not found".into(),
        project: None,
    });

    let response = execute(&schema, r#"{ user { project(projectID: "p9") { name } } }"#).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "project p9 not found");
    assert_eq!(error_code(&response).as_deref(), Some("BUSINESS"));
    assert_eq!(dispatch.opened(), 1);
    assert_eq!(dispatch.closed(), 1);
}

#[tokio::test]
async fn blank_entity_id_is_rejected_without_backend_call() {
    let (schema, dispatch) = setup();
    let response = execute(&schema, r#"{ user { edgeCluster(edgeClusterID: " ") { name } } }"#).await;

    assert_eq!(error_code(&response).as_deref(), Some("ARGUMENT"));
    assert!(dispatch.methods().is_empty());
    assert_eq!(dispatch.opened(), 0);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let registry: Arc<dyn ResolverRegistry> = Registry::new(Backends::default());
    let schema = build_schema(registry, "default-user", None);

    let response = execute(&schema, r#"{ user { tenant(tenantID: "t1") { name } } }"#).await;

    assert_eq!(error_code(&response).as_deref(), Some("TRANSPORT"));
}

#[tokio::test]
async fn edge_cluster_owner_is_read_lazily() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ReadEdgeCluster", edge_cluster::ReadEdgeClusterResponse {
        edge_cluster: Some(edge_cluster_detail("p1", "edge-1")),
        ..Default::default()
    });
    dispatch.set_response("ReadProject", project::ReadProjectResponse {
        project: Some(project::Project {
            name: "proj1".into(),
        }),
        ..Default::default()
    });

    let value = data(
        execute(&schema, r#"{ user { edgeCluster(edgeClusterID: "e1") { name clusterType } } }"#)
            .await,
    );
    assert_eq!(value["user"]["edgeCluster"], json!({ "name": "edge-1", "clusterType": "K3S" }));
    assert_eq!(dispatch.methods(), vec!["ReadEdgeCluster"]);

    let value = data(
        execute(
            &schema,
            r#"{ user { edgeCluster(edgeClusterID: "e1") { project { id name } } } }"#,
        )
        .await,
    );
    assert_eq!(value["user"]["edgeCluster"]["project"], json!({ "id": "p1", "name": "proj1" }));
    assert_eq!(dispatch.count("ReadProject"), 1);
    let request: project::ReadProjectRequest = dispatch.request("ReadProject");
    assert_eq!(request.project_id, "p1");
    assert_eq!(dispatch.opened(), dispatch.closed());
}

#[tokio::test]
async fn edge_cluster_nodes_pods_and_services() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ReadEdgeCluster", edge_cluster::ReadEdgeClusterResponse {
        edge_cluster: Some(edge_cluster_detail("p1", "edge-1")),
        ..Default::default()
    });
    dispatch.set_response("ListEdgeClusterNodes", edge_cluster::ListEdgeClusterNodesResponse {
        nodes: vec![edge_cluster::EdgeClusterNode {
            metadata: Some(edge_cluster::ObjectMeta {
                id: "n1".into(),
                name: "worker-1".into(),
                namespace: String::new(),
            }),
            status: None,
        }],
        ..Default::default()
    });
    dispatch.set_response("ListEdgeClusterPods", edge_cluster::ListEdgeClusterPodsResponse {
        pods: vec![edge_cluster::EdgeClusterPod {
            metadata: Some(edge_cluster::ObjectMeta {
                id: "pod1".into(),
                name: "coredns".into(),
                namespace: "kube-system".into(),
            }),
            status: Some(edge_cluster::PodStatus {
                host_ip: "10.0.0.5".into(),
                pod_ip: "10.42.0.3".into(),
                conditions: vec![],
            }),
            spec: Some(edge_cluster::PodSpec {
                node_name: "worker-1".into(),
            }),
        }],
        ..Default::default()
    });
    dispatch.set_response("ListEdgeClusterServices", edge_cluster::ListEdgeClusterServicesResponse {
        error: Sentinel::Unknown as i32,
        error_message: "cluster unreachable".into(),
        services: vec![],
    });

    let value = data(
        execute(
            &schema,
            r#"{ user { edgeCluster(edgeClusterID: "e1") {
                nodes { metadata { id name namespace } }
                pods(nodeName: "worker-1", namespace: "kube-system") {
                    metadata { name namespace }
                    status { hostIP podIP }
                    spec { nodeName }
                }
            } } }"#,
        )
        .await,
    );
    let cluster = &value["user"]["edgeCluster"];
    assert_eq!(
        cluster["nodes"],
        json!([{ "metadata": { "id": "n1", "name": "worker-1", "namespace": null } }])
    );
    assert_eq!(
        cluster["pods"],
        json!([{
            "metadata": { "name": "coredns", "namespace": "kube-system" },
            "status": { "hostIP": "10.0.0.5", "podIP": "10.42.0.3" },
            "spec": { "nodeName": "worker-1" },
        }])
    );
    let request: edge_cluster::ListEdgeClusterPodsRequest = dispatch.request("ListEdgeClusterPods");
    assert_eq!(request.edge_cluster_id, "e1");
    assert_eq!(request.node_name, "worker-1");
    assert_eq!(request.namespace, "kube-system");

    let response = execute(
        &schema,
        r#"{ user { edgeCluster(edgeClusterID: "e1") { services { metadata { name } } } } }"#,
    )
    .await;
    assert_eq!(response.errors[0].message, "cluster unreachable");
    assert_eq!(dispatch.opened(), dispatch.closed());
}

// ── Connections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn connection_copies_page_flags_and_total_verbatim() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ListTenants", tenant::ListTenantsResponse {
        has_previous_page: false,
        has_next_page: true,
        total_count: 42,
        tenants: vec![tenant_item("t1", "acme", "c1"), tenant_item("t2", "globex", "c2")],
        ..Default::default()
    });

    let value = data(
        execute(
            &schema,
            r#"{ user { tenants(first: 2, after: "c0", tenantIDs: ["t1", "t2"]) {
                totalCount
                pageInfo { startCursor endCursor hasNextPage hasPreviousPage }
                edges { cursor node { id name } }
            } } }"#,
        )
        .await,
    );

    assert_eq!(
        value["user"]["tenants"],
        json!({
            "totalCount": 42,
            "pageInfo": {
                "startCursor": "c1",
                "endCursor": "c2",
                "hasNextPage": true,
                "hasPreviousPage": false,
            },
            "edges": [
                { "cursor": "c1", "node": { "id": "t1", "name": "acme" } },
                { "cursor": "c2", "node": { "id": "t2", "name": "globex" } },
            ],
        })
    );
    // Edge nodes reuse the page's detail.
    assert_eq!(dispatch.methods(), vec!["ListTenants"]);

    let request: tenant::ListTenantsRequest = dispatch.request("ListTenants");
    let pagination = request.pagination.unwrap();
    assert!(pagination.has_first);
    assert_eq!(pagination.first, 2);
    assert!(pagination.has_after);
    assert_eq!(pagination.after, "c0");
    assert!(!pagination.has_last);
    assert!(!pagination.has_before);
    assert_eq!(request.tenant_ids, vec!["t1".to_string(), "t2".to_string()]);
}

#[tokio::test]
async fn connection_drops_items_without_entity() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ListProjects", project::ListProjectsResponse {
        total_count: 3,
        projects: vec![
            project::ProjectWithCursor {
                project_id: "p1".into(),
                project: Some(project::Project { name: "one".into() }),
                cursor: "c1".into(),
            },
            project::ProjectWithCursor {
                project_id: "p2".into(),
                project: None,
                cursor: "c2".into(),
            },
            project::ProjectWithCursor {
                project_id: "p3".into(),
                project: Some(project::Project {
                    name: "three".into(),
                }),
                cursor: "c3".into(),
            },
        ],
        ..Default::default()
    });

    let value = data(
        execute(
            &schema,
            r#"{ user { projects(sortingOptions: [{ name: "name", direction: DESCENDING }]) {
                totalCount
                pageInfo { startCursor endCursor }
                edges { cursor }
            } } }"#,
        )
        .await,
    );

    let projects = &value["user"]["projects"];
    assert_eq!(projects["totalCount"], 3);
    assert_eq!(projects["edges"], json!([{ "cursor": "c1" }, { "cursor": "c3" }]));
    assert_eq!(projects["pageInfo"], json!({ "startCursor": "c1", "endCursor": "c3" }));

    let request: project::ListProjectsRequest = dispatch.request("ListProjects");
    assert_eq!(request.sorting_options.len(), 1);
    assert_eq!(request.sorting_options[0].name, "name");
    assert_eq!(request.sorting_options[0].direction, 1);
}

#[tokio::test]
async fn page_info_spans_items_dropped_at_the_page_bounds() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ListProjects", project::ListProjectsResponse {
        has_next_page: true,
        total_count: 10,
        projects: vec![
            project::ProjectWithCursor {
                project_id: "p1".into(),
                project: None,
                cursor: "c1".into(),
            },
            project::ProjectWithCursor {
                project_id: "p2".into(),
                project: Some(project::Project { name: "two".into() }),
                cursor: "c2".into(),
            },
            project::ProjectWithCursor {
                project_id: "p3".into(),
                project: None,
                cursor: "c3".into(),
            },
        ],
        ..Default::default()
    });
    dispatch.set_response("ListEdgeClusters", edge_cluster::ListEdgeClustersResponse {
        edge_clusters: vec![
            edge_cluster::EdgeClusterWithCursor {
                edge_cluster_id: "e1".into(),
                edge_cluster: Some(edge_cluster::EdgeCluster {
                    project_id: "p2".into(),
                    name: "edge".into(),
                    ..Default::default()
                }),
                cursor: "k1".into(),
                provision_detail: None,
            },
            edge_cluster::EdgeClusterWithCursor {
                edge_cluster_id: "e2".into(),
                edge_cluster: None,
                cursor: "k2".into(),
                provision_detail: None,
            },
        ],
        ..Default::default()
    });

    let value = data(
        execute(
            &schema,
            r#"{ user {
                projects { pageInfo { startCursor endCursor hasNextPage } edges { cursor } }
                edgeClusters { pageInfo { startCursor endCursor } edges { cursor } }
            } }"#,
        )
        .await,
    );

    let projects = &value["user"]["projects"];
    assert_eq!(projects["edges"], json!([{ "cursor": "c2" }]));
    assert_eq!(
        projects["pageInfo"],
        json!({ "startCursor": "c1", "endCursor": "c3", "hasNextPage": true })
    );

    let clusters = &value["user"]["edgeClusters"];
    assert_eq!(clusters["edges"], json!([{ "cursor": "k1" }]));
    assert_eq!(clusters["pageInfo"], json!({ "startCursor": "k1", "endCursor": "k2" }));
}

#[tokio::test]
async fn empty_connection_has_blank_cursors() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ListEdgeClusters", edge_cluster::ListEdgeClustersResponse::default());

    let value = data(
        execute(
            &schema,
            "{ user { edgeClusters { totalCount pageInfo { startCursor endCursor } edges { cursor } } } }",
        )
        .await,
    );

    assert_eq!(
        value["user"]["edgeClusters"],
        json!({
            "totalCount": 0,
            "pageInfo": { "startCursor": "", "endCursor": "" },
            "edges": [],
        })
    );
}

#[tokio::test]
async fn project_edge_clusters_are_filtered_by_project() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ReadProject", project::ReadProjectResponse {
        project: Some(project::Project {
            name: "proj1".into(),
        }),
        ..Default::default()
    });
    dispatch.set_response("ListEdgeClusters", edge_cluster::ListEdgeClustersResponse {
        total_count: 1,
        edge_clusters: vec![edge_cluster::EdgeClusterWithCursor {
            edge_cluster_id: "e1".into(),
            edge_cluster: Some(edge_cluster_detail("p1", "edge-1")),
            cursor: "c1".into(),
            provision_detail: Some(edge_cluster::ProvisionDetail {
                ingress: vec![edge_cluster::Ingress {
                    ip: "192.168.1.10".into(),
                    hostname: String::new(),
                }],
                ports: vec![edge_cluster::Port {
                    port: 6443,
                    protocol: edge_cluster::Protocol::Tcp as i32,
                }],
                kubeconfig_content: String::new(),
            }),
        }],
        ..Default::default()
    });

    let value = data(
        execute(
            &schema,
            r#"{ user { project(projectID: "p1") { edgeClusters(last: 5) { edges { node {
                id name provisionDetail { ingress { ip } ports { port protocol } kubeconfigContent }
            } } } } } }"#,
        )
        .await,
    );

    assert_eq!(
        value["user"]["project"]["edgeClusters"]["edges"][0]["node"],
        json!({
            "id": "e1",
            "name": "edge-1",
            "provisionDetail": {
                "ingress": [{ "ip": "192.168.1.10" }],
                "ports": [{ "port": 6443, "protocol": "TCP" }],
                "kubeconfigContent": null,
            },
        })
    );
    assert_eq!(dispatch.methods(), vec!["ReadProject", "ListEdgeClusters"]);
    let request: edge_cluster::ListEdgeClustersRequest = dispatch.request("ListEdgeClusters");
    assert_eq!(request.project_ids, vec!["p1".to_string()]);
    let pagination = request.pagination.unwrap();
    assert!(pagination.has_last);
    assert_eq!(pagination.last, 5);
    assert!(!pagination.has_first);
}

#[tokio::test]
async fn list_business_error_fails_connection() {
    let (schema, dispatch) = setup();
    dispatch.set_response("ListTenants", tenant::ListTenantsResponse {
        error: Sentinel::BadRequest as i32,
        error_message: "first and last are mutually exclusive".into(),
        ..Default::default()
    });

    let response = execute(&schema, "{ user { tenants(first: 1, last: 1) { totalCount } } }").await;

    assert_eq!(response.errors[0].message, "first and last are mutually exclusive");
    assert_eq!(dispatch.opened(), 1);
    assert_eq!(dispatch.closed(), 1);
}

// ── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_project_returns_edge_without_refetch() {
    let (schema, dispatch) = setup();
    dispatch.set_response("CreateProject", project::CreateProjectResponse {
        error: Sentinel::NoError as i32,
        error_message: String::new(),
        project_id: "p1".into(),
        project: Some(project::Project {
            name: "proj1".into(),
        }),
        cursor: "c1".into(),
    });

    let value = data(
        execute(
            &schema,
            r#"mutation { createProject(input: { name: "proj1", clientMutationId: "abc" }) {
                clientMutationId
                project { cursor node { id name } }
            } }"#,
        )
        .await,
    );

    assert_eq!(
        value["createProject"],
        json!({
            "clientMutationId": "abc",
            "project": { "cursor": "c1", "node": { "id": "p1", "name": "proj1" } },
        })
    );
    assert_eq!(dispatch.methods(), vec!["CreateProject"]);
    let request: project::CreateProjectRequest = dispatch.request("CreateProject");
    assert_eq!(request.project.unwrap().name, "proj1");
    assert_eq!(dispatch.opened(), 1);
    assert_eq!(dispatch.closed(), 1);
}

#[tokio::test]
async fn delete_tenant_echoes_id_and_missing_client_mutation_id() {
    let (schema, dispatch) = setup();
    dispatch.set_response("DeleteTenant", tenant::DeleteTenantResponse::default());

    let value = data(
        execute(
            &schema,
            r#"mutation { deleteTenant(input: { tenantID: "t1" }) { deletedTenantID clientMutationId } }"#,
        )
        .await,
    );

    assert_eq!(
        value["deleteTenant"],
        json!({ "deletedTenantID": "t1", "clientMutationId": null })
    );
    let request: tenant::DeleteTenantRequest = dispatch.request("DeleteTenant");
    assert_eq!(request.tenant_id, "t1");
}

#[tokio::test]
async fn update_tenant_uses_response_detail() {
    let (schema, dispatch) = setup();
    dispatch.set_response("UpdateTenant", tenant::UpdateTenantResponse {
        tenant: Some(tenant::Tenant {
            name: "renamed".into(),
        }),
        cursor: "c7".into(),
        ..Default::default()
    });

    let value = data(
        execute(
            &schema,
            r#"mutation { updateTenant(input: { tenantID: "t1", name: "renamed", clientMutationId: "m1" }) {
                clientMutationId
                tenant { cursor node { id name } }
            } }"#,
        )
        .await,
    );

    assert_eq!(
        value["updateTenant"],
        json!({
            "clientMutationId": "m1",
            "tenant": { "cursor": "c7", "node": { "id": "t1", "name": "renamed" } },
        })
    );
    let request: tenant::UpdateTenantRequest = dispatch.request("UpdateTenant");
    assert_eq!(request.tenant_id, "t1");
    assert_eq!(request.tenant.unwrap().name, "renamed");
    assert_eq!(dispatch.count("ReadTenant"), 0);
}

#[tokio::test]
async fn mutation_business_error_yields_no_payload() {
    let (schema, dispatch) = setup();
    dispatch.set_response("CreateTenant", tenant::CreateTenantResponse {
        error: Sentinel::AlreadyExists as i32,
        error_message: "tenant acme already exists".into(),
        ..Default::default()
    });

    let response = execute(
        &schema,
        r#"mutation { createTenant(input: { name: "acme", clientMutationId: "x" }) { clientMutationId } }"#,
    )
    .await;

    assert_eq!(response.errors.len(), 1);
    let err = &response.errors[0];
    assert_eq!(err.message, "tenant acme already exists");
    let backend_code = err
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("backendCode"))
        .map(ToString::to_string);
    assert_eq!(backend_code.as_deref(), Some("\"ALREADY_EXISTS\""));
    let data = response.data.into_json().unwrap();
    assert!(data["createTenant"].is_null());
    assert_eq!(dispatch.opened(), 1);
    assert_eq!(dispatch.closed(), 1);
}

#[tokio::test]
async fn blank_mutation_input_never_reaches_backend() {
    let (schema, dispatch) = setup();

    let response = execute(
        &schema,
        r#"mutation { deleteProject(input: { projectID: "" }) { deletedProjectID } }"#,
    )
    .await;
    assert_eq!(error_code(&response).as_deref(), Some("ARGUMENT"));

    let response = execute(
        &schema,
        r#"mutation { createEdgeCluster(input: {
            projectID: "p1", name: "edge-1", clusterSecret: "  ", clusterType: K3S
        }) { clientMutationId } }"#,
    )
    .await;
    assert_eq!(error_code(&response).as_deref(), Some("ARGUMENT"));
    assert!(response.errors[0].message.contains("clusterSecret"));

    assert!(dispatch.methods().is_empty());
    assert_eq!(dispatch.opened(), 0);
}

#[tokio::test]
async fn create_edge_cluster_translates_input() {
    let (schema, dispatch) = setup();
    dispatch.set_response("CreateEdgeCluster", edge_cluster::CreateEdgeClusterResponse {
        edge_cluster_id: "e1".into(),
        edge_cluster: Some(edge_cluster_detail("p1", "edge-1")),
        cursor: "c1".into(),
        ..Default::default()
    });

    let value = data(
        execute(
            &schema,
            r#"mutation { createEdgeCluster(input: {
                projectID: "p1", name: "edge-1", clusterSecret: "s3cret", clusterType: K3S
            }) {
                clientMutationId
                edgeCluster { cursor node { id name clusterSecret clusterType provisionDetail { kubeconfigContent } } }
            } }"#,
        )
        .await,
    );

    assert_eq!(
        value["createEdgeCluster"],
        json!({
            "clientMutationId": null,
            "edgeCluster": {
                "cursor": "c1",
                "node": {
                    "id": "e1",
                    "name": "edge-1",
                    "clusterSecret": "s3cret",
                    "clusterType": "K3S",
                    "provisionDetail": null,
                },
            },
        })
    );
    let request: edge_cluster::CreateEdgeClusterRequest = dispatch.request("CreateEdgeCluster");
    assert_eq!(request.edge_cluster, Some(edge_cluster_detail("p1", "edge-1")));
    assert_eq!(dispatch.methods(), vec!["CreateEdgeCluster"]);
}

#[tokio::test]
async fn update_and_delete_edge_cluster() {
    let (schema, dispatch) = setup();
    dispatch.set_response("UpdateEdgeCluster", edge_cluster::UpdateEdgeClusterResponse {
        edge_cluster: Some(edge_cluster_detail("p2", "edge-renamed")),
        cursor: "c2".into(),
        ..Default::default()
    });
    dispatch.set_response("DeleteEdgeCluster", edge_cluster::DeleteEdgeClusterResponse::default());

    let value = data(
        execute(
            &schema,
            r#"mutation {
                updateEdgeCluster(input: {
                    edgeClusterID: "e1", projectID: "p2", name: "edge-renamed",
                    clusterSecret: "s3cret", clusterType: K3S, clientMutationId: "u"
                }) { clientMutationId edgeCluster { cursor node { id name } } }
                deleteEdgeCluster(input: { edgeClusterID: "e1", clientMutationId: "d" }) {
                    clientMutationId deletedEdgeClusterID
                }
            }"#,
        )
        .await,
    );

    assert_eq!(
        value,
        json!({
            "updateEdgeCluster": {
                "clientMutationId": "u",
                "edgeCluster": { "cursor": "c2", "node": { "id": "e1", "name": "edge-renamed" } },
            },
            "deleteEdgeCluster": { "clientMutationId": "d", "deletedEdgeClusterID": "e1" },
        })
    );
    let request: edge_cluster::UpdateEdgeClusterRequest = dispatch.request("UpdateEdgeCluster");
    assert_eq!(request.edge_cluster_id, "e1");
    assert_eq!(request.edge_cluster.unwrap().project_id, "p2");
    assert_eq!(dispatch.methods(), vec!["UpdateEdgeCluster", "DeleteEdgeCluster"]);
    assert_eq!(dispatch.opened(), 2);
    assert_eq!(dispatch.closed(), 2);
}

#[tokio::test]
async fn update_and_delete_project() {
    let (schema, dispatch) = setup();
    dispatch.set_response("UpdateProject", project::UpdateProjectResponse {
        project: Some(project::Project {
            name: "proj2".into(),
        }),
        cursor: "c9".into(),
        ..Default::default()
    });
    dispatch.set_response("DeleteProject", project::DeleteProjectResponse::default());

    let value = data(
        execute(
            &schema,
            r#"mutation {
                updateProject(input: { projectID: "p1", name: "proj2" }) {
                    clientMutationId project { node { id name } }
                }
                deleteProject(input: { projectID: "p1", clientMutationId: "z" }) {
                    clientMutationId deletedProjectID
                }
            }"#,
        )
        .await,
    );

    assert_eq!(
        value,
        json!({
            "updateProject": {
                "clientMutationId": null,
                "project": { "node": { "id": "p1", "name": "proj2" } },
            },
            "deleteProject": { "clientMutationId": "z", "deletedProjectID": "p1" },
        })
    );
}

#[tokio::test]
async fn schema_exposes_relay_types() {
    let (schema, _) = setup();
    let sdl = schema.sdl();
    for fragment in [
        "type TenantTypeConnection",
        "type ProjectTypeEdge",
        "type EdgeClusterTypeConnection",
        "type CreateTenantPayload",
        "input CreateEdgeClusterInput",
        "deletedEdgeClusterID: ID!",
        "type EdgeClusterProvisionDetail",
        "type EdgeClusterService",
    ] {
        assert!(sdl.contains(fragment), "missing `{fragment}` in schema");
    }
}
