use flat_exprs::{
    Builtin, Expr, ExprError, ExprType, ExprVec, NormalFormConfig, Poly, PolyCtx, expand,
    expanded_normal_form, express,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn small_integer_atom() {
    init();
    let five = Expr::from(5);
    assert_eq!(five.expr_type(), ExprType::SmallInt);
    assert_eq!(five.size(), 1);
    assert_eq!(five.arity(), -1);
    assert!(five.is_integer());
    assert!(!five.is_symbol());
    assert!(five.is_atom());
    assert!(five.func().is_err());
}

#[test]
fn nested_call_construction() {
    init();
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    let two = Expr::from(2);
    let inner = Expr::mul(&two, &y);
    let root = Expr::add(&x, &inner);

    assert_eq!(root.arity(), 2);
    assert_eq!(root.expr_type(), ExprType::Call2);
    assert_eq!(root.arg(1).unwrap(), inner);
    assert_eq!(root.view_arg(0).unwrap(), x.view());
    assert_eq!(root.func().unwrap(), Expr::from(Builtin::Add));
    assert!(root.check_sizes());
    assert_eq!(root.to_string(), "Add(x, Mul(2, y))");
}

#[test]
fn rational_function_round_trip() {
    init();
    let x = Expr::symbol("x");
    let mut vars = ExprVec::new();
    vars.append(&x);

    let e = Expr::div(Expr::add(&x, Expr::from(1)), &x);
    let f = expand(&e, &vars).unwrap();
    let ctx = PolyCtx::new(1);
    assert_eq!(f.numerator(), &Poly::var(0, ctx).add(&Poly::one(ctx)));
    assert_eq!(f.denominator(), &Poly::var(0, ctx));

    let back = express(&f, &vars);
    let g = expand(&back, &vars).unwrap();
    assert_eq!(g.numerator(), f.numerator());
    assert_eq!(g.denominator(), f.denominator());
}

#[test]
fn non_integer_exponent_is_rejected() {
    init();
    let x = Expr::symbol("x");
    let half = Expr::div(Expr::from(5), Expr::from(2));
    let e = Expr::pow(&x, &half);

    let mut vars = ExprVec::new();
    vars.append(&x);
    match expand(&e, &vars) {
        Err(ExprError::NonRationalExponent(sub)) => assert_eq!(sub, e),
        other => panic!("expected a non-rational exponent error, got {other:?}"),
    }
    assert!(matches!(
        expanded_normal_form(&e, &NormalFormConfig::default()),
        Err(ExprError::NonRationalExponent(_))
    ));

    assert!(e.check_sizes());
    assert!(e.is_pow());
    assert_eq!(e.arg(1).unwrap(), half);
    assert_eq!(e.to_string(), "Pow(x, Div(5, 2))");
}

#[test]
fn wide_calls_use_explicit_arity() {
    init();
    let f = Expr::symbol("f");
    let args: Vec<Expr> = (1..=9).map(Expr::from).collect();
    let e = Expr::call(&f, &args);
    assert_eq!(e.expr_type(), ExprType::CallN);
    assert_eq!(e.arity(), 9);
    assert_eq!(e.size(), 2 + 1 + 9);
    let back: Vec<i64> = e.view().args().filter_map(|a| a.to_i64()).collect();
    assert_eq!(back, (1..=9).collect::<Vec<_>>());
}
