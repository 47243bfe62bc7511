mod region;
