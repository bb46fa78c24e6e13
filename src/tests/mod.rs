mod cascade_test;
