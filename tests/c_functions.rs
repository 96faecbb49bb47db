mod util;

use indoc::indoc;
use util::run_program;
use util::SUCCESS;

#[test]
fn call_and_return() {
    let input = indoc! {"
        fun add(a, b) {
            return a + b;
        }
        print add(1, 2);
        print add;
    "};
    let expected = indoc! {"
        3
        <fn add>
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn function_without_return_yields_nil() {
    let input = indoc! {"
        fun noop() {}
        print noop();
    "};
    run_program(input, "nil\n", SUCCESS);
}

#[test]
fn recursion() {
    let input = indoc! {"
        fun fib(n) {
            if (n <= 1) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(10);
    "};
    run_program(input, "55\n", SUCCESS);
}

#[test]
fn closure_keeps_state_between_calls() {
    let input = indoc! {"
        fun counter() {
            var n = 0;
            fun inc() {
                n = n + 1;
                return n;
            }
            return inc;
        }
        var c = counter();
        print c();
        print c();
        print c();
    "};
    let expected = indoc! {"
        1
        2
        3
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn separate_activations_get_separate_closures() {
    let input = indoc! {"
        fun counter() {
            var n = 0;
            fun inc() {
                n = n + 1;
                return n;
            }
            return inc;
        }
        var a = counter();
        var b = counter();
        print a();
        print a();
        print b();
    "};
    let expected = indoc! {"
        1
        2
        1
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn return_unwinds_nested_statements() {
    let input = indoc! {"
        fun find() {
            var i = 0;
            while (true) {
                if (i == 3) {
                    return i;
                }
                i = i + 1;
            }
        }
        print find();
    "};
    run_program(input, "3\n", SUCCESS);
}

#[test]
fn functions_are_first_class() {
    let input = indoc! {"
        fun twice(f, x) {
            return f(f(x));
        }
        fun inc(n) {
            return n + 1;
        }
        print twice(inc, 5);
    "};
    run_program(input, "7\n", SUCCESS);
}
