use std::sync::Arc;
use std::time::Duration;

use demand_core::{from_fn, DemandError, DemandReturn, DemandSpec, DemandTrace, InMemoryDemandTrace, Scope,
                  SupplierRegistry, SupplyDemand};
use serde_json::{json, Value};
use uuid::Uuid;

async fn slow(data: Option<Value>, _s: Scope) -> DemandReturn {
    tokio::time::sleep(Duration::from_millis(15)).await;
    Ok(data)
}

async fn fast(_d: Option<Value>, scope: Scope) -> DemandReturn {
    Ok(Some(json!(scope.path())))
}

#[tokio::test]
async fn independent_trees_do_not_share_state() {
    let trace = Arc::new(InMemoryDemandTrace::new());
    let engine = SupplyDemand::builder().trace(trace.clone()).build();

    async fn root_a(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::of_type("slow").data(json!("A"))).await
    }
    async fn root_b(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::of_type("slow").data(json!("B"))).await
    }

    let suppliers = SupplierRegistry::new().with("slow", slow);
    let (id_a, id_b) = (Uuid::new_v4(), Uuid::new_v4());
    let (a, b) = tokio::join!(engine.run_with_id(id_a, root_a, &suppliers), engine.run_with_id(id_b, root_b, &suppliers));
    assert_eq!(a, Ok(Some(json!("A"))));
    assert_eq!(b, Ok(Some(json!("B"))));
    assert_eq!(trace.list(id_a).len(), trace.list(id_b).len());
    assert!(trace.list(id_a).iter().all(|e| e.resolution_id == id_a));
}

#[tokio::test]
async fn supplier_can_fan_out_with_join() {
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        let (x, y) = tokio::join!(scope.demand(DemandSpec::of_type("slow").key("x").data(json!(1))),
                                  scope.demand(DemandSpec::of_type("fast").key("y")));
        Ok(Some(json!([x?, y?])))
    }
    let suppliers = SupplierRegistry::new().with("slow", slow).with("fast", fast);
    let out = SupplyDemand::default().run(root, &suppliers).await.unwrap();
    assert_eq!(out, Some(json!([1, "root/y(fast)"])));
}

#[tokio::test]
async fn scoped_demand_can_be_moved_into_a_task() {
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        let demand = scope.scoped_demand().clone();
        let handle = tokio::spawn(async move { demand.demand(DemandSpec::of_type("fast").key("spawned")).await });
        handle.await.map_err(|e| DemandError::supplier(scope.path(), e.to_string()))?
    }
    let suppliers = SupplierRegistry::new().with("fast", fast);
    let out = SupplyDemand::default().run(root, &suppliers).await.unwrap();
    assert_eq!(out, Some(json!("root/spawned(fast)")));
}

#[tokio::test]
async fn closure_suppliers_capture_state() {
    let prefix = Arc::new(String::from("greeting"));
    let greet = from_fn(move |data: Option<Value>, _scope: Scope| {
        let prefix = Arc::clone(&prefix);
        async move {
            let name = data.and_then(|v| v.as_str().map(str::to_owned)).unwrap_or_default();
            Ok::<_, DemandError>(Some(json!(format!("{prefix}: {name}"))))
        }
    });
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::of_type("greet").data(json!("ana"))).await
    }
    let suppliers = SupplierRegistry::new().with_arc("greet", greet);
    let out = SupplyDemand::default().run(root, &suppliers).await.unwrap();
    assert_eq!(out, Some(json!("greeting: ana")));
}

#[tokio::test]
async fn shared_root_supplier_runs_through_run_shared() {
    let root = from_fn(|_d: Option<Value>, scope: Scope| async move { scope.demand(DemandSpec::of_type("fast")).await });
    let engine = SupplyDemand::default();
    let suppliers = SupplierRegistry::new().with("fast", fast);
    let out = engine.run_shared(Uuid::new_v4(), root, &suppliers).await.unwrap();
    assert_eq!(out, Some(json!("root/root(fast)")));
}
