use join_macros::value_object;

#[value_object]
struct Amount {
    value: i64,
}

#[value_object(debug = false, default = false)]
struct Label(String);

#[value_object]
enum Level {
    #[default]
    Low,
    High,
}

fn main() {
    let _ = format!("{:?}", Amount { value: 0 });

    let a = Amount::default();
    let _b = a.clone();
    let _eq = a == Amount { value: 0 };

    // default = false 时需显式构造
    let _ = Label("x".into()) == Label("x".into());

    let _lv: Level = Default::default();
    let _ = Level::High;
}
