mod util;

use indoc::indoc;
use util::run_program;
use util::SUCCESS;

#[test]
fn string_concatenation() {
    let input = r#"print "hi" + " " + "lo";"#;
    run_program(input, "hi lo\n", SUCCESS);
}

#[test]
fn arithmetic() {
    let input = indoc! {"
        print 1 + 2;
        print 7 * 6;
        print 10 / 4;
        print 3.5 - 0.25;
        print -(2 + 3);
    "};
    let expected = indoc! {"
        3
        42
        2.5
        3.25
        -5
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn number_formatting() {
    // Integral values print without a fractional part; everything else as
    // the shortest form that round-trips.
    let input = indoc! {"
        print 2.0;
        print 1.5;
        print 0.5;
        print 100;
    "};
    let expected = indoc! {"
        2
        1.5
        0.5
        100
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn comparison() {
    let input = indoc! {"
        print 1 < 2;
        print 2 <= 2;
        print 3 > 4;
        print 4 >= 4;
    "};
    let expected = indoc! {"
        true
        true
        false
        true
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn equality() {
    let input = indoc! {r#"
        print 1 == 1;
        print 1 == 2;
        print "a" == "a";
        print "a" == "b";
        print nil == nil;
        print 1 == "1";
        print true != false;
    "#};
    let expected = indoc! {"
        true
        false
        true
        false
        true
        false
        true
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn nan_is_not_equal_to_itself() {
    let input = "print 0/0 == 0/0;";
    run_program(input, "false\n", SUCCESS);
}

#[test]
fn truthiness() {
    // Only false and nil are falsey; zero and the empty string are truthy.
    let input = indoc! {r#"
        print !true;
        print !nil;
        print !0;
        print !"";
    "#};
    let expected = indoc! {"
        false
        true
        false
        false
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn grouping() {
    let input = "print (1 + 2) * 3;";
    run_program(input, "9\n", SUCCESS);
}

#[test]
fn logical_operators_return_operands() {
    // A logic operator returns a value with the appropriate truthiness,
    // not a coerced boolean.
    let input = indoc! {r#"
        print nil or "x";
        print false and 123;
        print 1 and 2;
        print "a" or "b";
    "#};
    let expected = indoc! {"
        x
        false
        2
        a
    "};
    run_program(input, expected, SUCCESS);
}

#[test]
fn short_circuit_skips_right_operand() {
    let input = indoc! {r#"
        fun boom() {
            print "boom";
            return true;
        }
        print "x" or boom();
        print false and boom();
    "#};
    let expected = indoc! {"
        x
        false
    "};
    run_program(input, expected, SUCCESS);
}
