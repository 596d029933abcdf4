use join_domain::entity::{Entity, NewEntity, NullId};
use join_macros::{entity, entity_id};

#[entity_id]
struct ItemId(i64);

/// 带新建变体的实体
#[entity(id = ItemId, new = NewItem)]
#[serde(rename_all = "camelCase")]
struct Item {
    display_name: Option<String>,
}

#[entity(debug = false)]
struct Plain {
    label: String,
}

impl std::fmt::Debug for Plain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Plain({})", self.id)
    }
}

fn main() {
    let item = Item {
        id: ItemId::new(3),
        display_name: Some("a".into()),
    };
    assert_eq!(item.id().get(), 3);

    // 新建变体：id 恒为 null
    let draft = NewItem::from_persisted(item.clone());
    assert_eq!(draft.id, NullId);
    let json = serde_json::to_value(&draft).unwrap();
    assert!(json["id"].is_null());
    assert_eq!(json["displayName"], "a");
    assert_eq!(draft.with_id(ItemId::new(3)), item);

    // 默认 id 类型为 i64，手写 Debug 可编译说明未自动派生
    let plain = Plain { id: 1, label: "x".into() };
    let _ = format!("{:?} {}", plain, plain.label);
}
