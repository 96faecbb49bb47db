mod util;

use indoc::indoc;
use util::run_program;
use util::SUCCESS;

#[test]
fn class_and_instance_stringification() {
    let input = indoc! {"
        class Breakfast {}
        print Breakfast;
        print Breakfast();
    "};
    let expected = indoc! {"
        <class Breakfast>
        <instance Breakfast>
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn fields_can_be_added_freely() {
    let input = indoc! {r#"
        class Bag {}
        var bag = Bag();
        bag.item = "apple";
        print bag.item;
    "#};
    run_program(input, "apple\n", SUCCESS);
}

#[test]
fn methods_see_this() {
    let input = indoc! {r#"
        class Cake {
            taste() {
                var adjective = "delicious";
                print "The " + this.flavor + " cake is " + adjective + "!";
            }
        }
        var cake = Cake();
        cake.flavor = "German chocolate";
        cake.taste();
    "#};
    run_program(input, "The German chocolate cake is delicious!\n", SUCCESS);
}

#[test]
fn initializer_receives_arguments() {
    let input = indoc! {"
        class A {
            init(x) {
                this.x = x;
            }
        }
        print A(5).x;
    "};
    run_program(input, "5\n", SUCCESS);
}

#[test]
fn bare_return_in_initializer_still_yields_instance() {
    let input = indoc! {"
        class Foo {
            init() {
                this.ready = true;
                return;
            }
        }
        print Foo().ready;
    "};
    run_program(input, "true\n", SUCCESS);
}

#[test]
fn bound_method_remembers_its_receiver() {
    let input = indoc! {r#"
        class Person {
            init(name) {
                this.name = name;
            }
            greet() {
                print "hi " + this.name;
            }
        }
        var p = Person("lox");
        var m = p.greet;
        m();
    "#};
    run_program(input, "hi lox\n", SUCCESS);
}

#[test]
fn methods_are_inherited() {
    let input = indoc! {r#"
        class A {
            greet() {
                print "hi";
            }
        }
        class B < A {}
        B().greet();
    "#};
    run_program(input, "hi\n", SUCCESS);
}

#[test]
fn super_calls_the_superclass_method() {
    let input = indoc! {r#"
        class A {
            m() {
                print "A";
            }
        }
        class B < A {
            m() {
                super.m();
                print "B";
            }
        }
        B().m();
    "#};
    let expected = indoc! {"
        A
        B
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn super_keeps_this_bound_to_the_receiver() {
    let input = indoc! {r#"
        class A {
            describe() {
                print "A sees " + this.tag;
            }
        }
        class B < A {
            describe() {
                super.describe();
            }
        }
        var b = B();
        b.tag = "b's tag";
        b.describe();
    "#};
    run_program(input, "A sees b's tag\n", SUCCESS);
}

#[test]
fn construction_runs_only_the_classs_own_initializer() {
    // B inherits A's init as a method, but calling B itself takes no
    // arguments and runs no initializer.
    let input = indoc! {"
        class A {
            init(x) {
                this.x = x;
            }
        }
        class B < A {}
        print B();
    "};
    run_program(input, "<instance B>\n", SUCCESS);
}

#[test]
fn fields_shadow_methods() {
    let input = indoc! {r#"
        class C {
            m() {
                print "method";
            }
        }
        var c = C();
        c.m = "field";
        print c.m;
    "#};
    run_program(input, "field\n", SUCCESS);
}
