mod util;

use indoc::indoc;
use util::run_program;
use util::SUCCESS;

#[test]
fn block_shadowing() {
    let input = indoc! {"
        var a = 1;
        {
            var a = 2;
            print a;
        }
        print a;
    "};
    let expected = indoc! {"
        2
        1
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn global_redeclaration_rebinds() {
    // Redeclaring is an error in a local scope but fine at the top level.
    let input = indoc! {"
        var a = 1;
        var a = 2;
        print a;
    "};
    run_program(input, "2\n", SUCCESS);
}

#[test]
fn uninitialized_variable_is_nil() {
    let input = indoc! {"
        var a;
        print a;
    "};
    run_program(input, "nil\n", SUCCESS);
}

#[test]
fn assignment_is_an_expression() {
    let input = indoc! {"
        var a = 1;
        print a = 2;
        print a;
    "};
    let expected = indoc! {"
        2
        2
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn if_else() {
    let input = indoc! {r#"
        if (1 < 2) print "yes"; else print "no";
        if (nil) print "t"; else print "f";
        if (0) print "zero is truthy";
    "#};
    let expected = indoc! {"
        yes
        f
        zero is truthy
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn while_loop() {
    let input = indoc! {"
        var i = 3;
        while (i > 0) {
            print i;
            i = i - 1;
        }
    "};
    let expected = indoc! {"
        3
        2
        1
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn for_loop() {
    let input = "for (var i = 0; i < 3; i = i + 1) print i;";
    let expected = indoc! {"
        0
        1
        2
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn for_loop_without_initializer() {
    let input = indoc! {"
        var i = 0;
        for (; i < 2; i = i + 1) print i;
        print i;
    "};
    let expected = indoc! {"
        0
        1
        2
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn closures_capture_declaration_scope() {
    // A function body resolves against the scope as it was at declaration
    // time, not at call time: the later `var a` in the block must not be
    // visible to showA.
    let input = indoc! {r#"
        var a = "global";
        {
            fun showA() {
                print a;
            }
            showA();
            var a = "block";
            showA();
        }
    "#};
    let expected = indoc! {"
        global
        global
    "};
    run_program(input, expected, SUCCESS);
}
