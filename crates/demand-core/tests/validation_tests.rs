use demand_core::{resolve_demand, supply_demand, DemandError, DemandRequest, DemandReturn, DemandSpec, Scope,
                  SupplierRegistry, ROOT_TYPE};
use serde_json::{json, Value};

async fn never(_d: Option<Value>, _s: Scope) -> DemandReturn {
    panic!("supplier must not run for an invalid request");
}

#[tokio::test]
async fn top_level_requires_key_type_and_path() {
    let suppliers = SupplierRegistry::new().with("x", never);
    for (key, type_name, path) in [("", "x", "root"), ("k", "", "root"), ("k", "x", "")] {
        let err = resolve_demand(DemandRequest::new(key, type_name, path, suppliers.clone())).await.unwrap_err();
        assert!(err.is_validation(), "{key:?}/{type_name:?}/{path:?} -> {err:?}");
    }
}

#[tokio::test]
async fn nested_demand_without_type_fails() {
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec { key: Some("k".into()),
                                  data: Some(json!(1)),
                                  ..DemandSpec::default() })
             .await
    }
    let err = supply_demand(root, &SupplierRegistry::new()).await.unwrap_err();
    assert_eq!(err, DemandError::Validation("type is required in scoped demand".into()));
}

#[tokio::test]
async fn nested_demand_with_empty_key_or_type_fails_in_resolver() {
    async fn empty_key(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::of_type("x").key("")).await
    }
    async fn empty_type(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::of_type("")).await
    }
    let suppliers = SupplierRegistry::new().with("x", never);
    assert!(supply_demand(empty_key, &suppliers).await.unwrap_err().is_validation());
    assert!(supply_demand(empty_type, &suppliers).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn validation_error_is_not_swallowed_by_intermediate_suppliers() {
    async fn middle(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::default()).await
    }
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        scope.demand(DemandSpec::of_type("middle")).await
    }
    let suppliers = SupplierRegistry::new().with("middle", middle);
    assert!(supply_demand(root, &suppliers).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn unknown_type_is_a_soft_miss() {
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        let missing = scope.demand(DemandSpec::of_type("nobody")).await;
        assert_eq!(missing, Ok(None));
        Ok(Some(json!("still running")))
    }
    assert_eq!(supply_demand(root, &SupplierRegistry::new()).await, Ok(Some(json!("still running"))));

    let top = resolve_demand(DemandRequest::new("k", "nobody", "root", SupplierRegistry::new())).await;
    assert_eq!(top, Ok(None));
}

#[tokio::test]
async fn root_type_cannot_be_demanded_again() {
    async fn root(_d: Option<Value>, scope: Scope) -> DemandReturn {
        if scope.depth() > 0 {
            return Ok(Some(json!(scope.path())));
        }
        scope.demand(DemandSpec::of_type(ROOT_TYPE).key("again")).await
    }
    let err = supply_demand(root, &SupplierRegistry::new()).await.unwrap_err();
    assert_eq!(err, DemandError::Validation(format!("{ROOT_TYPE} is reserved for the root demand")));
}
