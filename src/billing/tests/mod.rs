mod proptest_pricing;
