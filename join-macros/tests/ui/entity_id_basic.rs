use join_macros::entity_id;

#[entity_id]
struct OrderId(i64);

#[entity_id(copy = false)]
struct SkuId(String);

fn main() {
    let id: OrderId = " 42 ".parse().unwrap();
    assert_eq!(id, OrderId::new(42));
    assert_eq!(id.to_string(), "42");
    assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    let raw: i64 = id.into();
    assert_eq!(raw, 42);

    // Copy 可用：使用后仍可访问
    let copied = id;
    assert_eq!(copied.get(), id.get());

    let sku = SkuId::new("abc".to_string());
    assert_eq!(sku.get(), "abc");
    assert!(OrderId::new(1) < OrderId::new(2));
}
