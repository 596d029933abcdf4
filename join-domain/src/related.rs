//! 关联实体（Related Entity）
//!
//! 表单的下拉选项来自对关联实体的分页查询，当前实体已关联的那一项
//! 可能不在本页结果中。这里提供按标识比较与“缺失则追加”的合并，
//! 保证选项中始终包含当前关联项。
//!
use std::collections::HashSet;
use std::hash::Hash;

/// 能以标识区分彼此的对象（实体本身或其投影）
pub trait Identified {
    type Key: Eq + Hash + Clone;

    fn identifier(&self) -> &Self::Key;
}

/// 按标识比较两个（可能为空的）关联引用
///
/// 两者皆为空时相等；一空一非空时不等；否则比较标识。
/// 允许实体与其投影互相比较，例如 `Categoria` 与 `CategoriaRef`。
pub fn compare<A, B>(a: Option<&A>, b: Option<&B>) -> bool
where
    A: Identified,
    B: Identified<Key = A::Key>,
{
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.identifier() == b.identifier(),
        _ => false,
    }
}

/// 将集合中尚不存在的候选项追加到末尾
///
/// - 保持原集合顺序，候选项按给定顺序追加；
/// - 空候选项被忽略；
/// - 标识相同的候选项只保留第一个。
pub fn add_to_collection_if_missing<T, I>(collection: Vec<T>, candidates: I) -> Vec<T>
where
    T: Identified,
    I: IntoIterator<Item = Option<T>>,
{
    let mut candidates = candidates.into_iter().flatten().peekable();
    if candidates.peek().is_none() {
        return collection;
    }

    let mut seen: HashSet<T::Key> = collection.iter().map(|e| e.identifier().clone()).collect();
    let mut out = collection;
    for candidate in candidates {
        if seen.insert(candidate.identifier().clone()) {
            out.push(candidate);
        }
    }
    out
}
