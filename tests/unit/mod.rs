mod book_invariant_tests;
