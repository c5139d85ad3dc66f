// Expected outputs live next to this file. program_compact.gr is a single
// line without a trailing newline; keep it that way when editing.
mod main {
    use grol_fmt::{Config, PrintError, PrintState, compact_print, debug_string, pretty_print};
    use grol_lang::ast::builder::*;
    use grol_lang::ast::{InfixExpression, Node, PostfixExpression};
    use grol_lang::log;
    use grol_lang::token::{Token, TokenKind};
    use grol_lang::{array, block, program};

    fn init_logger() {
        let _ = colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    }

    fn canonical(node: &Node) -> String {
        pretty_print(node, Config::canonical()).expect("failed to pretty print")
    }

    fn program_tree() -> Node {
        let fib = function(
            None,
            &["n"],
            block![
                if_else(
                    infix(ident("n"), TokenKind::LtEq, int(1)),
                    block![ret(Some(ident("n")))],
                    None,
                ),
                infix(
                    call(
                        ident("fib"),
                        vec![infix(ident("n"), TokenKind::Minus, int(1))]
                    ),
                    TokenKind::Plus,
                    call(
                        ident("fib"),
                        vec![infix(ident("n"), TokenKind::Minus, int(2))]
                    ),
                ),
            ],
        );
        let m = map(vec![(string("b"), int(2)), (string("a"), int(1))]).unwrap();
        program![
            line_comment("// Fibonacci"),
            infix(ident("fib"), TokenKind::Assign, fib),
            infix(ident("m"), TokenKind::Assign, m),
            comment("/* order kept */", true, false),
            for_loop(
                infix(ident("i"), TokenKind::Lt, int(3)),
                block![
                    builtin(TokenKind::Println, vec![ident("i")]),
                    postfix("i", TokenKind::Incr),
                ],
            ),
        ]
    }

    #[test]
    fn program_canonical() {
        init_logger();
        let ans = include_str!("program.gr").replace("\r\n", "\n");
        assert_eq!(canonical(&program_tree()), ans);
    }

    #[test]
    fn program_compact() {
        init_logger();
        let ans = include_str!("program_compact.gr");
        assert_eq!(compact_print(&program_tree()).unwrap(), ans);
    }

    #[test]
    fn printing_is_repeatable() {
        let tree = program_tree();
        let first = canonical(&tree);
        for _ in 0..3 {
            assert_eq!(canonical(&tree), first);
        }
    }

    #[test]
    fn trees_print_concurrently() {
        let tree = program_tree();
        let expected = canonical(&tree);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| canonical(&tree))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn else_if_chain_inside_function() {
        let chain = if_else(
            ident("c1"),
            block![ident("x")],
            Some(block![if_else(
                ident("c2"),
                block![ident("y")],
                Some(block![ident("z")]),
            )]),
        );
        let tree = program![function(Some("f"), &[], block![chain])];
        let ans = include_str!("else_chain.gr").replace("\r\n", "\n");
        assert_eq!(canonical(&tree), ans);
    }

    #[test]
    fn else_if_at_root_and_compact() {
        let tree = program![if_else(
            ident("c1"),
            block![ident("x")],
            Some(block![if_else(
                ident("c2"),
                block![ident("y")],
                Some(block![ident("z")]),
            )]),
        )];
        assert_eq!(
            canonical(&tree),
            "if c1 {\n\tx\n} else if c2 {\n\ty\n} else {\n\tz\n}\n"
        );
        assert_eq!(compact_print(&tree).unwrap(), "if c1{x}else if c2{y}else{z}");
    }

    #[test]
    fn else_block_with_more_than_an_if_is_not_chained() {
        let tree = program![if_else(
            ident("c1"),
            block![ident("x")],
            Some(block![
                if_else(ident("c2"), block![ident("y")], None),
                ident("z"),
            ]),
        )];
        assert_eq!(
            canonical(&tree),
            "if c1 {\n\tx\n} else {\n\tif c2 {\n\t\ty\n\t}\n\tz\n}\n"
        );
    }

    #[test]
    fn empty_blocks() {
        let tree = program![if_else(ident("c"), block![], None)];
        assert_eq!(canonical(&tree), "if c {\n}\n");
        assert_eq!(compact_print(&tree).unwrap(), "if c{}");
        assert_eq!(canonical(&program![]), "\n");
        assert_eq!(compact_print(&program![]).unwrap(), "");
    }

    mod parens {
        use super::*;

        fn check(node: Node, expected: &str) {
            assert_eq!(canonical(&program![node]), format!("{expected}\n"));
        }

        #[test]
        fn stacked_prefix() {
            check(
                prefix(TokenKind::Minus, prefix(TokenKind::Minus, ident("a"))),
                "-(-a)",
            );
            check(
                prefix(TokenKind::Bang, prefix(TokenKind::Minus, ident("a"))),
                "!(-a)",
            );
        }

        #[test]
        fn prefix_binds_tighter_than_infix() {
            check(
                infix(
                    prefix(TokenKind::Minus, ident("a")),
                    TokenKind::Minus,
                    ident("b"),
                ),
                "-a - b",
            );
            check(
                prefix(
                    TokenKind::Bang,
                    infix(ident("a"), TokenKind::Eq, ident("b")),
                ),
                "!(a == b)",
            );
        }

        #[test]
        fn only_lower_precedence_operands() {
            let sum = infix(ident("a"), TokenKind::Plus, ident("b"));
            let product = infix(ident("b"), TokenKind::Asterisk, ident("c"));
            check(
                infix(sum, TokenKind::Asterisk, ident("c")),
                "(a + b) * c",
            );
            check(infix(ident("a"), TokenKind::Plus, product), "a + b * c");
        }

        #[test]
        fn index_and_postfix() {
            check(
                index(infix(ident("a"), TokenKind::Plus, ident("b")), int(0)),
                "(a + b)[0]",
            );
            check(
                prefix(TokenKind::Minus, index(ident("a"), int(0))),
                "-a[0]",
            );
            check(
                infix(postfix("i", TokenKind::Incr), TokenKind::Asterisk, int(2)),
                "i++ * 2",
            );
            check(dot(ident("m"), "key"), "m.key");
        }

        #[test]
        fn arguments_and_subscripts_start_over() {
            let sum = || infix(ident("a"), TokenKind::Plus, ident("b"));
            check(
                infix(ident("x"), TokenKind::Asterisk, call(ident("f"), vec![sum()])),
                "x * f(a + b)",
            );
            check(
                infix(
                    ident("x"),
                    TokenKind::Asterisk,
                    builtin(TokenKind::Len, vec![sum()]),
                ),
                "x * len(a + b)",
            );
            check(
                infix(ident("x"), TokenKind::Asterisk, index(ident("arr"), sum())),
                "x * arr[a + b]",
            );
        }

        #[test]
        fn callees() {
            check(
                call(infix(ident("a"), TokenKind::Plus, ident("b")), vec![int(1)]),
                "(a + b)(1)",
            );
            check(call(prefix(TokenKind::Minus, ident("f")), vec![]), "(-f)()");
            check(index(call(ident("f"), vec![]), int(0)), "f()[0]");
            check(dot(index(ident("a"), int(0)), "x"), "a[0].x");
            check(call(dot(ident("m"), "f"), vec![]), "m.f()");
            let iife = program![call(lambda(&["x"], block![ident("x")]), vec![int(3)])];
            assert_eq!(canonical(&iife), "(x => {\n\tx\n})(3)\n");
            assert_eq!(compact_print(&iife).unwrap(), "(x=>{x})(3)");
            assert_eq!(
                debug_string(&program![call(ident("f"), vec![ident("a")])]).unwrap(),
                "(f(a))"
            );
        }

        #[test]
        fn slices() {
            let open = program![index(
                ident("a"),
                infix_open(int(2), TokenKind::Colon)
            )];
            assert_eq!(canonical(&open), "a[2:]\n");
            assert_eq!(compact_print(&open).unwrap(), "a[2:]");
            check(
                index(ident("a"), infix(int(1), TokenKind::Colon, int(3))),
                "a[1 : 3]",
            );
        }

        #[test]
        fn debug_parenthesizes_everything() {
            let shape = |n: Node| debug_string(&program![n]).unwrap();
            assert_eq!(
                shape(infix(
                    ident("a"),
                    TokenKind::Plus,
                    infix(ident("b"), TokenKind::Asterisk, ident("c"))
                )),
                "(a+(b*c))"
            );
            assert_eq!(
                shape(prefix(
                    TokenKind::Minus,
                    prefix(TokenKind::Minus, ident("a"))
                )),
                "(-(-a))"
            );
            assert_eq!(shape(postfix("i", TokenKind::Decr)), "(i--)");
            let left = infix(
                infix(ident("a"), TokenKind::Minus, ident("b")),
                TokenKind::Minus,
                ident("c"),
            );
            let right = infix(
                ident("a"),
                TokenKind::Minus,
                infix(ident("b"), TokenKind::Minus, ident("c")),
            );
            assert_eq!(shape(left), "((a-b)-c)");
            assert_eq!(shape(right), "(a-(b-c))");
        }
    }

    mod literals {
        use super::*;

        #[test]
        fn map_keeps_insertion_order() {
            let m = map(vec![(ident("b"), int(2)), (ident("a"), int(1))]).unwrap();
            let tree = program![m];
            assert_eq!(canonical(&tree), "{b:2, a:1}\n");
            assert_eq!(compact_print(&tree).unwrap(), "{b:2,a:1}");
        }

        #[test]
        fn duplicate_map_keys_are_rejected() {
            let res = map(vec![(string("a"), int(1)), (string("a"), int(2))]);
            assert!(res.is_err());
        }

        #[test]
        fn strings_are_quoted() {
            let tree = program![builtin(
                TokenKind::Println,
                vec![string("a \"quoted\"\n"), string("tab\there")]
            )];
            assert_eq!(
                canonical(&tree),
                "println(\"a \\\"quoted\\\"\\n\", \"tab\\there\")\n"
            );
        }

        #[test]
        fn scalars() {
            let tree = program![array![
                int(1),
                float(2.5),
                boolean(true),
                string("s"),
                array![]
            ]];
            assert_eq!(canonical(&tree), "[1, 2.5, true, \"s\", []]\n");
            assert_eq!(compact_print(&tree).unwrap(), "[1,2.5,true,\"s\",[]]");
        }

        #[test]
        fn control_flow_keywords() {
            let tree = program![
                for_loop(
                    boolean(true),
                    block![control(TokenKind::Break), control(TokenKind::Continue)],
                ),
                ret(None),
            ];
            assert_eq!(
                canonical(&tree),
                "for true {\n\tbreak\n\tcontinue\n}\nreturn\n"
            );
            assert_eq!(
                compact_print(&tree).unwrap(),
                "for true{break continue}return"
            );
        }
    }

    mod functions {
        use super::*;

        #[test]
        fn lambda_with_one_parameter_has_no_parens() {
            let body = block![infix(ident("x"), TokenKind::Asterisk, ident("x"))];
            let tree = program![infix(
                ident("f"),
                TokenKind::Assign,
                lambda(&["x"], body)
            )];
            assert_eq!(canonical(&tree), "f = x => {\n\tx * x\n}\n");
            assert_eq!(compact_print(&tree).unwrap(), "f=x=>{x*x}");
        }

        #[test]
        fn lambda_parens_otherwise() {
            let two = program![lambda(&["a", "b"], block![ident("a")])];
            assert_eq!(canonical(&two), "(a, b) => {\n\ta\n}\n");
            let none = program![lambda(&[], block![int(1)])];
            assert_eq!(compact_print(&none).unwrap(), "()=>{1}");
        }

        #[test]
        fn named_variadic_function() {
            let tree = program![function(Some("sum"), &["a", ".."], block![ident("a")])];
            assert_eq!(canonical(&tree), "func sum(a, ..) {\n\ta\n}\n");
            assert_eq!(compact_print(&tree).unwrap(), "func sum(a,..){a}");
        }

        #[test]
        fn macros() {
            let tree = program![macro_lit(
                &["x"],
                block![builtin(TokenKind::Quote, vec![ident("x")])]
            )];
            assert_eq!(canonical(&tree), "macro(x) {\n\tquote(x)\n}\n");
            assert_eq!(compact_print(&tree).unwrap(), "macro(x){quote(x)}");
        }
    }

    mod comments {
        use super::*;

        #[test]
        fn same_line_flags() {
            let tree = program![
                ident("x"),
                comment("// trailing", true, false),
                comment("/* lead */", false, true),
                ident("y"),
            ];
            assert_eq!(canonical(&tree), "x // trailing\n/* lead */ y\n");
            assert_eq!(compact_print(&tree).unwrap(), "x y");
        }

        #[test]
        fn comment_on_the_brace_line() {
            let tree = program![function(
                None,
                &[],
                block![comment("// body", true, false), ident("x")]
            )];
            assert_eq!(canonical(&tree), "func() { // body\n\tx\n}\n");
        }
    }

    mod compact_spacing {
        use super::*;

        fn compact(statements: Vec<Node>) -> String {
            compact_print(&program(statements)).unwrap()
        }

        #[test]
        fn after_an_infix() {
            let assign = || infix(ident("x"), TokenKind::Assign, int(1));
            assert_eq!(compact(vec![assign(), ident("y")]), "x=1 y");
            assert_eq!(compact(vec![assign(), assign()]), "x=1 x=1");
            let arr = infix(ident("x"), TokenKind::Assign, array![int(1)]);
            assert_eq!(compact(vec![arr, ident("y")]), "x=[1]y");
        }

        #[test]
        fn before_an_array() {
            assert_eq!(
                compact(vec![ident("f"), array![int(2)]]),
                "f [2]"
            );
        }

        #[test]
        fn between_identifier_like_statements() {
            assert_eq!(
                compact(vec![ident("a"), call(ident("f"), vec![])]),
                "a f()"
            );
            assert_eq!(
                compact(vec![
                    builtin(TokenKind::Print, vec![int(1)]),
                    ident("b")
                ]),
                "print(1) b"
            );
        }

        #[test]
        fn prefix_right_after_an_operator() {
            let neg = |name| prefix(TokenKind::Minus, ident(name));
            let tree = program![infix(ident("a"), TokenKind::Minus, neg("b"))];
            assert_eq!(canonical(&tree), "a - -b\n");
            assert_eq!(compact_print(&tree).unwrap(), "a- -b");
            assert_eq!(
                compact(vec![infix(
                    ident("a"),
                    TokenKind::Minus,
                    infix(neg("b"), TokenKind::Asterisk, ident("c")),
                )]),
                "a- -b*c"
            );
            assert_eq!(
                compact(vec![infix(
                    postfix("i", TokenKind::Decr),
                    TokenKind::Minus,
                    int(1)
                )]),
                "i-- -1"
            );
            assert_eq!(
                compact(vec![infix(ident("x"), TokenKind::Assign, neg("y"))]),
                "x=-y"
            );
        }

        #[test]
        fn keywords_and_literals_after_a_word() {
            assert_eq!(
                compact(vec![ident("x"), ret(Some(ident("y")))]),
                "x return y"
            );
            assert_eq!(
                compact(vec![
                    ident("x"),
                    if_else(ident("c"), block![ident("y")], None),
                    boolean(true),
                    ident("z"),
                ]),
                "x if c{y}true z"
            );
            assert_eq!(compact(vec![ident("a"), int(1)]), "a 1");
            assert_eq!(
                compact(vec![function(
                    None,
                    &[],
                    block![ident("x"), ret(Some(ident("y")))]
                )]),
                "func(){x return y}"
            );
        }
    }

    mod errors {
        use super::*;
        use grol_lang::utils::error::{ReportableError, dump_to_string};

        fn comma_infix() -> Node {
            Node::Infix(InfixExpression {
                token: Token::new(TokenKind::Comma, ",", 4..5),
                left: Box::new(ident("a")),
                right: Some(Box::new(ident("b"))),
            })
        }

        #[test]
        fn operator_without_precedence() {
            init_logger();
            let tree = program![ident("ok"), comma_infix()];
            let err = pretty_print(&tree, Config::canonical()).unwrap_err();
            match &err {
                PrintError::NoPrecedence { token } => assert_eq!(token.literal(), ","),
                other => panic!("unexpected {other:?}"),
            }
            assert_eq!(err.get_labels()[0].0, 4..5);
            let errs: Vec<Box<dyn ReportableError>> = vec![Box::new(err)];
            assert_eq!(dump_to_string(&errs), "precedence not found for ,");
        }

        #[test]
        fn postfix_without_precedence() {
            let bad = Node::Postfix(PostfixExpression {
                token: Token::from_kind(TokenKind::Bang),
                prev: Token::new(TokenKind::Ident, "i", 0..1),
            });
            assert!(matches!(
                debug_string(&program![bad]),
                Err(PrintError::NoPrecedence { .. })
            ));
        }

        #[test]
        fn every_profile_fails_the_same_way() {
            let tree = program![comma_infix()];
            for config in [Config::canonical(), Config::compact(), Config::debug()] {
                assert!(matches!(
                    pretty_print(&tree, config),
                    Err(PrintError::NoPrecedence { .. })
                ));
            }
        }

        struct Closed;
        impl std::fmt::Write for Closed {
            fn write_str(&mut self, _s: &str) -> std::fmt::Result {
                Err(std::fmt::Error)
            }
        }

        #[test]
        fn sink_failure() {
            let tree = program![ident("x")];
            let mut ps = PrintState::with_writer(Closed);
            assert!(matches!(ps.pretty(&tree), Err(PrintError::Write(_))));
        }

        #[test]
        fn custom_sink() {
            let tree = program![infix(ident("a"), TokenKind::Plus, int(1))];
            let mut ps = PrintState::with_writer(String::new()).configure(Config::compact());
            ps.pretty(&tree).unwrap();
            assert_eq!(ps.into_inner(), "a+1");
        }
    }
}
